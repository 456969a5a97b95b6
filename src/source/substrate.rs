// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Substrate backend over raw JSON-RPC
//!
//! Reads storage directly instead of going through runtime metadata:
//!
//! - `System.Account` is a `Blake2_128Concat` map; the value ends with the
//!   `AccountData { free, reserved, frozen/misc_frozen, flags/fee_frozen }`
//!   struct of four little-endian `u128`s. The fields before it changed
//!   across runtime versions (refcount widths, `sufficients`), so only the
//!   trailing 64 bytes are decoded.
//! - `Timestamp.Now` is a plain `u64` of milliseconds.

use alloy_primitives::{hex, Bytes, B256, U256};
use alloy_rpc_client::RpcClient;
use alloy_transport::TransportResult;
use async_trait::async_trait;
use blake2::{digest::consts::U16, Blake2b, Digest};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{AccountBalance, AccountId32, BalanceSource, Connector};
use crate::config::BalanceGraphConfig;
use crate::errors::{AddressError, RpcError};
use crate::provider::{create_rpc_client, ProviderConfig};
use crate::types::decimals::TokenDecimals;

type Blake2b128 = Blake2b<U16>;

/// `twox128("System") ++ twox128("Account")`
const SYSTEM_ACCOUNT_PREFIX: &str =
    "26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9";

/// `twox128("Timestamp") ++ twox128("Now")`
const TIMESTAMP_NOW_KEY: &str =
    "0xf0c365c3cf59d671eb72da0e7a4113c49f1f0515f462cdcf84e0f1d6045dfcbb";

/// `AccountData`: four `u128` fields
const ACCOUNT_DATA_LEN: usize = 64;

/// Storage key of `System.Account(account)`
pub(crate) fn system_account_key(account: &AccountId32) -> String {
    let hashed = Blake2b128::digest(account.as_bytes());
    format!(
        "0x{SYSTEM_ACCOUNT_PREFIX}{}{}",
        hex::encode(hashed),
        hex::encode(account.as_bytes())
    )
}

/// Decodes free and reserved from an encoded `AccountInfo`
///
/// A missing entry means the account does not exist at that block, which
/// charts as zero.
pub(crate) fn decode_account_info(raw: Option<&[u8]>) -> Result<AccountBalance, RpcError> {
    let Some(raw) = raw else {
        return Ok(AccountBalance::default());
    };
    if raw.len() < ACCOUNT_DATA_LEN {
        return Err(RpcError::decode_failed(
            "System.Account",
            format!("expected at least {ACCOUNT_DATA_LEN} bytes, got {}", raw.len()),
        ));
    }

    let data = &raw[raw.len() - ACCOUNT_DATA_LEN..];
    Ok(AccountBalance::new(read_u128_le(&data[..16]), read_u128_le(&data[16..32])))
}

fn read_u128_le(bytes: &[u8]) -> U256 {
    let mut buf = [0u8; 16];
    buf.copy_from_slice(bytes);
    U256::from(u128::from_le_bytes(buf))
}

/// Decodes `Timestamp.Now`; an unset value (genesis) is the epoch
pub(crate) fn decode_timestamp(raw: Option<&[u8]>) -> Result<DateTime<Utc>, RpcError> {
    let millis = match raw {
        None => 0,
        Some(raw) => {
            let buf: [u8; 8] = raw.try_into().map_err(|_| {
                RpcError::decode_failed(
                    "Timestamp.Now",
                    format!("expected 8 bytes, got {}", raw.len()),
                )
            })?;
            u64::from_le_bytes(buf)
        }
    };

    i64::try_from(millis)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| RpcError::decode_failed("Timestamp.Now", format!("{millis} out of range")))
}

/// Reads `tokenDecimals` from `system_properties`, which is a number on
/// single-token chains and an array on multi-token ones
pub(crate) fn decimals_from_properties(properties: &Value) -> Option<TokenDecimals> {
    let value = match properties.get("tokenDecimals")? {
        Value::Array(values) => values.first()?,
        other => other,
    };
    value
        .as_u64()
        .and_then(|d| u8::try_from(d).ok())
        .map(TokenDecimals::new)
}

#[derive(Debug, Deserialize)]
struct HeaderResponse {
    number: String,
}

/// Balance source for Substrate-based chains
#[derive(Debug, Clone)]
pub struct SubstrateBalanceSource {
    client: RpcClient,
    decimals: TokenDecimals,
}

impl SubstrateBalanceSource {
    /// Wraps a client whose chain decimals are already known
    pub fn new(client: RpcClient, decimals: TokenDecimals) -> Self {
        Self { client, decimals }
    }

    /// Wraps a client, asking the chain for its decimals
    ///
    /// Chains that do not advertise `tokenDecimals` fall back to 12, the
    /// Substrate default.
    pub async fn from_chain(client: RpcClient) -> Result<Self, RpcError> {
        let properties: Value = client
            .request_noparams::<Value>("system_properties")
            .await
            .map_err(RpcError::get_chain_properties_failed)?;

        let decimals = decimals_from_properties(&properties).unwrap_or(TokenDecimals::KUSAMA);
        info!(decimals = decimals.as_u8(), "Read chain decimals");
        Ok(Self::new(client, decimals))
    }

    async fn storage(&self, key: String, block_hash: B256) -> TransportResult<Option<Bytes>> {
        self.client
            .request::<_, Option<Bytes>>("state_getStorage", (key, block_hash))
            .await
    }
}

#[async_trait]
impl BalanceSource for SubstrateBalanceSource {
    type Account = AccountId32;

    fn parse_account(&self, raw: &str) -> Result<AccountId32, AddressError> {
        raw.parse()
    }

    fn decimals(&self) -> TokenDecimals {
        self.decimals
    }

    async fn block_hash(&self, block_number: u64) -> Result<B256, RpcError> {
        let hash = self
            .client
            .request::<_, Option<B256>>("chain_getBlockHash", (block_number,))
            .await
            .map_err(|e| RpcError::get_block_hash_failed(block_number, e))?;

        hash.ok_or(RpcError::BlockNotFound { block_number })
    }

    async fn account_at(
        &self,
        block_hash: B256,
        account: &AccountId32,
    ) -> Result<AccountBalance, RpcError> {
        let raw = self
            .storage(system_account_key(account), block_hash)
            .await
            .map_err(|e| RpcError::get_account_failed(block_hash, e))?;

        decode_account_info(raw.as_ref().map(|bytes| &bytes[..]))
    }

    async fn timestamp_at(&self, block_hash: B256) -> Result<DateTime<Utc>, RpcError> {
        let raw = self
            .storage(TIMESTAMP_NOW_KEY.to_string(), block_hash)
            .await
            .map_err(|e| RpcError::get_timestamp_failed(block_hash, e))?;

        decode_timestamp(raw.as_ref().map(|bytes| &bytes[..]))
    }

    async fn best_block_number(&self) -> Result<u64, RpcError> {
        let header: HeaderResponse = self
            .client
            .request_noparams::<HeaderResponse>("chain_getHeader")
            .await
            .map_err(RpcError::get_block_number_failed)?;

        let digits = header.number.trim_start_matches("0x");
        let number = u64::from_str_radix(digits, 16).map_err(|e| {
            RpcError::decode_failed("header number", format!("{}: {e}", header.number))
        })?;
        debug!(number, "Best block");
        Ok(number)
    }

    fn name(&self) -> &'static str {
        "substrate"
    }
}

/// Connects [`SubstrateBalanceSource`]s with shared transport settings
#[derive(Debug, Clone, Default)]
pub struct SubstrateConnector {
    config: ProviderConfig,
    decimals: Option<TokenDecimals>,
}

impl SubstrateConnector {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            decimals: None,
        }
    }

    /// Transport template and decimals override from a session config
    pub fn from_config(config: &BalanceGraphConfig) -> Self {
        Self {
            config: config.provider.clone(),
            decimals: config.decimals,
        }
    }

    /// Skip `system_properties` and use these decimals
    pub fn with_decimals(mut self, decimals: TokenDecimals) -> Self {
        self.decimals = Some(decimals);
        self
    }
}

#[async_trait]
impl Connector for SubstrateConnector {
    type Source = SubstrateBalanceSource;

    async fn connect(&self, endpoint: &str) -> Result<SubstrateBalanceSource, RpcError> {
        let client = create_rpc_client(&self.config.for_endpoint(endpoint)).await?;
        match self.decimals {
            Some(decimals) => Ok(SubstrateBalanceSource::new(client, decimals)),
            None => SubstrateBalanceSource::from_chain(client).await,
        }
    }
}
