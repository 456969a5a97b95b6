// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! RPC client construction
//!
//! Every balance source talks through an alloy [`RpcClient`]: the Substrate
//! backend issues raw JSON-RPC calls on it, the EVM backend wraps it in an
//! alloy provider. Transport middleware from [`crate::transport`] is applied
//! here, once, for both.
//!
//! ```rust,ignore
//! use balancegraph::provider::{create_rpc_client, ProviderConfig};
//!
//! let client = create_rpc_client(&ProviderConfig::public_endpoint("https://rpc.ibp.network/polkadot")).await?;
//! ```
//!
//! [`RpcClient`]: alloy_rpc_client::RpcClient

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::{create_evm_provider, create_rpc_client};

/// Ethereum provider over a bare RPC client
pub type EvmProvider = alloy_provider::RootProvider<alloy_network::Ethereum>;
