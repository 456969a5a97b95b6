// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! EVM backend over an alloy provider
//!
//! Native-coin balances only. EVM accounts have no reserved balance, so
//! every observation charts `reserved = 0`.

use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{AccountBalance, BalanceSource, Connector};
use crate::config::BalanceGraphConfig;
use crate::errors::{AddressError, RpcError};
use crate::provider::{create_evm_provider, create_rpc_client, EvmProvider, ProviderConfig};
use crate::types::decimals::TokenDecimals;

/// Balance source for EVM chains
///
/// # Examples
///
/// ```rust,ignore
/// use alloy_provider::ProviderBuilder;
/// use balancegraph::source::EvmBalanceSource;
///
/// let provider = ProviderBuilder::new().connect_http("https://eth.llamarpc.com".parse()?);
/// let source = EvmBalanceSource::new(provider);
/// ```
#[derive(Debug, Clone)]
pub struct EvmBalanceSource<P> {
    provider: P,
    decimals: TokenDecimals,
}

impl<P: Provider> EvmBalanceSource<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            decimals: TokenDecimals::ETHER,
        }
    }

    /// For chains whose native coin is not 18-decimal
    pub fn with_decimals(mut self, decimals: TokenDecimals) -> Self {
        self.decimals = decimals;
        self
    }
}

#[async_trait]
impl<P: Provider + 'static> BalanceSource for EvmBalanceSource<P> {
    type Account = Address;

    fn parse_account(&self, raw: &str) -> Result<Address, AddressError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AddressError::Empty);
        }
        raw.parse::<Address>()
            .map_err(|e| AddressError::invalid_hex(raw, e.to_string()))
    }

    fn decimals(&self) -> TokenDecimals {
        self.decimals
    }

    async fn block_hash(&self, block_number: u64) -> Result<B256, RpcError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(block_number))
            .await
            .map_err(|e| RpcError::get_block_hash_failed(block_number, e))?
            .ok_or(RpcError::BlockNotFound { block_number })?;

        Ok(block.header.hash)
    }

    async fn account_at(
        &self,
        block_hash: B256,
        account: &Address,
    ) -> Result<AccountBalance, RpcError> {
        let free = self
            .provider
            .get_balance(*account)
            .block_id(BlockId::hash(block_hash))
            .await
            .map_err(|e| RpcError::get_account_failed(block_hash, e))?;

        Ok(AccountBalance::new(free, U256::ZERO))
    }

    async fn timestamp_at(&self, block_hash: B256) -> Result<DateTime<Utc>, RpcError> {
        let block = self
            .provider
            .get_block_by_hash(block_hash)
            .await
            .map_err(|e| RpcError::get_timestamp_failed(block_hash, e))?
            .ok_or_else(|| RpcError::decode_failed("block", format!("no block with hash {block_hash}")))?;

        let seconds = block.header.timestamp;
        i64::try_from(seconds)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| RpcError::decode_failed("block timestamp", format!("{seconds} out of range")))
    }

    async fn best_block_number(&self) -> Result<u64, RpcError> {
        let number = self
            .provider
            .get_block_number()
            .await
            .map_err(RpcError::get_block_number_failed)?;
        debug!(number, "Best block");
        Ok(number)
    }

    fn name(&self) -> &'static str {
        "evm"
    }
}

/// Connects [`EvmBalanceSource`]s with shared transport settings
#[derive(Debug, Clone)]
pub struct EvmConnector {
    config: ProviderConfig,
    decimals: TokenDecimals,
}

impl EvmConnector {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            decimals: TokenDecimals::ETHER,
        }
    }

    /// Transport template and decimals override from a session config
    pub fn from_config(config: &BalanceGraphConfig) -> Self {
        Self {
            config: config.provider.clone(),
            decimals: config.decimals.unwrap_or(TokenDecimals::ETHER),
        }
    }

    pub fn with_decimals(mut self, decimals: TokenDecimals) -> Self {
        self.decimals = decimals;
        self
    }
}

#[async_trait]
impl Connector for EvmConnector {
    type Source = EvmBalanceSource<EvmProvider>;

    async fn connect(&self, endpoint: &str) -> Result<Self::Source, RpcError> {
        let client = create_rpc_client(&self.config.for_endpoint(endpoint)).await?;
        Ok(EvmBalanceSource::new(create_evm_provider(client)).with_decimals(self.decimals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn source() -> EvmBalanceSource<EvmProvider> {
        EvmConnector::new(ProviderConfig::local_evm_node())
            .connect("http://127.0.0.1:8545")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_parse_account() {
        let source = source().await;
        let address = source
            .parse_account("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")
            .unwrap();
        assert_eq!(
            address,
            alloy_primitives::address!("d8da6bf26964af9d7eed9e03e53415d37aa96045")
        );
        assert_eq!(source.parse_account(""), Err(AddressError::Empty));
        assert!(matches!(
            source.parse_account("0x1234"),
            Err(AddressError::InvalidHex { .. })
        ));
    }

    #[tokio::test]
    async fn test_defaults_to_ether_decimals() {
        assert_eq!(source().await.decimals(), TokenDecimals::ETHER);
        assert_eq!(source().await.name(), "evm");
    }
}
