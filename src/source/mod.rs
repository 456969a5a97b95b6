// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain backends the sampler reads balances from
//!
//! The sampler only needs five things from a node: the hash of a block
//! number, the account's balances at a hash, the block time at a hash, the
//! best block number, and the chain's decimals. [`BalanceSource`] is that
//! seam; [`Connector`] builds one for an endpoint string so a session can
//! connect lazily and reconnect when the endpoint changes.
//!
//! Backends:
//! - [`SubstrateBalanceSource`] - raw JSON-RPC against a Substrate node,
//!   decoding `System.Account` and `Timestamp.Now` storage
//! - [`EvmBalanceSource`] - any alloy provider; reserved balance is zero

use std::fmt;

use alloy_primitives::{B256, U256};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::{AddressError, RpcError};
use crate::types::decimals::TokenDecimals;

mod account;
mod evm;
mod substrate;

pub use account::AccountId32;
pub use evm::{EvmBalanceSource, EvmConnector};
pub use substrate::{SubstrateBalanceSource, SubstrateConnector};

/// Raw fixed-point balances of an account at one block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountBalance {
    pub free: U256,
    pub reserved: U256,
}

impl AccountBalance {
    pub fn new(free: U256, reserved: U256) -> Self {
        Self { free, reserved }
    }
}

/// Read access to the chain state the sampler needs
///
/// Implementations must be cheap to share: the sampler issues every request
/// of a wave concurrently through `&self`.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Account identifier on this chain
    type Account: Clone + fmt::Debug + fmt::Display + Send + Sync;

    /// Parses a user-entered address
    fn parse_account(&self, raw: &str) -> Result<Self::Account, AddressError>;

    /// Scaling of this chain's balances
    fn decimals(&self) -> TokenDecimals;

    /// Resolves a block number to its hash
    async fn block_hash(&self, block_number: u64) -> Result<B256, RpcError>;

    /// Reads the account's balances at a block
    async fn account_at(
        &self,
        block_hash: B256,
        account: &Self::Account,
    ) -> Result<AccountBalance, RpcError>;

    /// Reads the chain timestamp at a block
    async fn timestamp_at(&self, block_hash: B256) -> Result<DateTime<Utc>, RpcError>;

    /// Current best block number
    async fn best_block_number(&self) -> Result<u64, RpcError>;

    /// First block worth charting for the account
    ///
    /// Neither backend indexes account history, so this is genesis.
    async fn first_block(&self, _account: &Self::Account) -> Result<u64, RpcError> {
        Ok(0)
    }

    /// Human-readable backend name for logs
    fn name(&self) -> &'static str;
}

/// Builds a [`BalanceSource`] for an endpoint
#[async_trait]
pub trait Connector: Send + Sync {
    type Source: BalanceSource;

    async fn connect(&self, endpoint: &str) -> Result<Self::Source, RpcError>;
}
