// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for balancegraph integration tests
//!
//! Provides an in-memory chain behind the `BalanceSource` and `Connector`
//! traits, recording every request so tests can check what was fetched.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{B256, U256};
use async_trait::async_trait;
use balancegraph::source::{AccountBalance, BalanceSource, Connector};
use balancegraph::{AddressError, RpcError, TokenDecimals};
use chrono::{DateTime, Utc};

/// Seconds between mock blocks
pub const BLOCK_TIME_SECS: i64 = 6;

/// Every request the mock chain has answered
#[derive(Debug, Default)]
pub struct RequestLog {
    pub connects: Mutex<Vec<String>>,
    pub hashes: Mutex<Vec<u64>>,
    pub accounts: Mutex<Vec<u64>>,
    pub timestamps: Mutex<Vec<u64>>,
}

impl RequestLog {
    pub fn connects(&self) -> Vec<String> {
        self.connects.lock().unwrap().clone()
    }

    pub fn hashes(&self) -> Vec<u64> {
        self.hashes.lock().unwrap().clone()
    }

    pub fn accounts(&self) -> Vec<u64> {
        self.accounts.lock().unwrap().clone()
    }

    pub fn timestamps(&self) -> Vec<u64> {
        self.timestamps.lock().unwrap().clone()
    }
}

/// Mock chain: the free balance at block `n` is `n`, reserved is 2
///
/// # Example
///
/// ```rust,ignore
/// let source = MockBalanceSource::new(1_000).failing_at(40);
/// let log = source.log();
/// ```
#[derive(Debug, Clone)]
pub struct MockBalanceSource {
    best_block: u64,
    fail_account_at: Option<u64>,
    delay: Option<Duration>,
    stalled_head: bool,
    log: Arc<RequestLog>,
}

#[allow(dead_code)]
impl MockBalanceSource {
    pub fn new(best_block: u64) -> Self {
        Self {
            best_block,
            fail_account_at: None,
            delay: None,
            stalled_head: false,
            log: Arc::new(RequestLog::default()),
        }
    }

    /// Account reads at `block` fail
    pub fn failing_at(mut self, block: u64) -> Self {
        self.fail_account_at = Some(block);
        self
    }

    /// Every account read takes `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Best-block lookups never answer
    pub fn with_stalled_head(mut self) -> Self {
        self.stalled_head = true;
        self
    }

    pub fn log(&self) -> Arc<RequestLog> {
        self.log.clone()
    }
}

pub fn hash_of(block: u64) -> B256 {
    B256::left_padding_from(&block.to_be_bytes())
}

pub fn block_of(hash: B256) -> u64 {
    u64::from_be_bytes(hash[24..].try_into().unwrap())
}

#[async_trait]
impl BalanceSource for MockBalanceSource {
    type Account = String;

    fn parse_account(&self, raw: &str) -> Result<String, AddressError> {
        match raw.trim() {
            "" => Err(AddressError::Empty),
            "bad" => Err(AddressError::invalid_ss58(raw, "checksum mismatch")),
            raw => Ok(raw.to_string()),
        }
    }

    fn decimals(&self) -> TokenDecimals {
        TokenDecimals::new(0)
    }

    async fn block_hash(&self, block_number: u64) -> Result<B256, RpcError> {
        self.log.hashes.lock().unwrap().push(block_number);
        if block_number > self.best_block {
            return Err(RpcError::BlockNotFound { block_number });
        }
        Ok(hash_of(block_number))
    }

    async fn account_at(&self, block_hash: B256, _account: &String) -> Result<AccountBalance, RpcError> {
        let block = block_of(block_hash);
        self.log.accounts.lock().unwrap().push(block);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_account_at == Some(block) {
            return Err(RpcError::get_account_failed(
                block_hash,
                std::io::Error::other("connection reset"),
            ));
        }
        Ok(AccountBalance::new(U256::from(block), U256::from(2u8)))
    }

    async fn timestamp_at(&self, block_hash: B256) -> Result<DateTime<Utc>, RpcError> {
        let block = block_of(block_hash);
        self.log.timestamps.lock().unwrap().push(block);
        Ok(DateTime::from_timestamp(block as i64 * BLOCK_TIME_SECS, 0).unwrap())
    }

    async fn best_block_number(&self) -> Result<u64, RpcError> {
        if self.stalled_head {
            std::future::pending::<()>().await;
        }
        Ok(self.best_block)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Endpoint whose handshake never completes
#[allow(dead_code)]
pub const STALLED_ENDPOINT: &str = "ws://stalled";

/// Hands out clones of one [`MockBalanceSource`]; `ws://down` refuses and
/// [`STALLED_ENDPOINT`] hangs
#[derive(Debug, Clone)]
pub struct MockConnector {
    source: MockBalanceSource,
}

#[allow(dead_code)]
impl MockConnector {
    pub fn new(source: MockBalanceSource) -> Self {
        Self { source }
    }

    pub fn log(&self) -> Arc<RequestLog> {
        self.source.log()
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Source = MockBalanceSource;

    async fn connect(&self, endpoint: &str) -> Result<MockBalanceSource, RpcError> {
        self.source.log.connects.lock().unwrap().push(endpoint.to_string());
        if endpoint == STALLED_ENDPOINT {
            std::future::pending::<()>().await;
        }
        if endpoint == "ws://down" {
            return Err(RpcError::ProviderConnectionFailed("connection refused".into()));
        }
        Ok(self.source.clone())
    }
}
