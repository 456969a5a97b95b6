// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for node operations.
//!
//! Both the Substrate and the EVM backends report failures through
//! [`RpcError`], carrying the block number or hash that was being read.

use alloy_primitives::B256;

/// Errors that can occur while reading chain data from a node.
///
/// # Examples
///
/// ```rust
/// use balancegraph::RpcError;
///
/// let error = RpcError::BlockNotFound { block_number: 42 };
/// assert_eq!(error.to_string(), "Block not found: 42");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The node has no block at this height (usually beyond the chain tip).
    #[error("Block not found: {block_number}")]
    BlockNotFound {
        /// The block number that wasn't found
        block_number: u64,
    },

    /// Resolving a block number to its hash failed.
    #[error("Failed to fetch hash of block {block_number}")]
    GetBlockHashFailed {
        /// The block number we tried to resolve
        block_number: u64,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading account state at a block failed.
    #[error("Failed to fetch account state at block {block_hash}")]
    GetAccountFailed {
        /// Hash of the block the state was read at
        block_hash: B256,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading the chain timestamp at a block failed.
    #[error("Failed to fetch timestamp at block {block_hash}")]
    GetTimestampFailed {
        /// Hash of the block the timestamp was read at
        block_hash: B256,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading the best block number failed.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading chain properties (token decimals) failed.
    #[error("Failed to fetch chain properties")]
    GetChainPropertiesFailed {
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node answered with data we could not decode.
    #[error("Failed to decode {what}: {details}")]
    DecodeFailed {
        /// What was being decoded (e.g. "System.Account")
        what: &'static str,
        /// Why decoding failed
        details: String,
    },

    /// Invalid RPC URL.
    #[error("Invalid RPC URL: {0}")]
    ProviderUrlInvalid(String),

    /// Connecting to the endpoint failed.
    #[error("Failed to connect to endpoint: {0}")]
    ProviderConnectionFailed(String),

    /// The endpoint uses a scheme this build cannot speak.
    #[error("Unsupported endpoint scheme '{scheme}'")]
    UnsupportedScheme {
        /// Scheme of the rejected URL
        scheme: String,
    },
}

impl RpcError {
    /// Helper to create a `GetBlockHashFailed` error from any error type.
    pub fn get_block_hash_failed(
        block_number: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetBlockHashFailed {
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetAccountFailed` error from any error type.
    pub fn get_account_failed(
        block_hash: B256,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetAccountFailed {
            block_hash,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetTimestampFailed` error from any error type.
    pub fn get_timestamp_failed(
        block_hash: B256,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetTimestampFailed {
            block_hash,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetChainPropertiesFailed` error from any error type.
    pub fn get_chain_properties_failed(
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetChainPropertiesFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `DecodeFailed` error.
    pub fn decode_failed(what: &'static str, details: impl Into<String>) -> Self {
        RpcError::DecodeFailed {
            what,
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failed_message() {
        let err = RpcError::decode_failed("Timestamp.Now", "expected 8 bytes, got 3");
        assert_eq!(
            err.to_string(),
            "Failed to decode Timestamp.Now: expected 8 bytes, got 3"
        );
    }

    #[test]
    fn test_get_block_hash_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = RpcError::get_block_hash_failed(7, io);
        assert_eq!(err.to_string(), "Failed to fetch hash of block 7");
        assert!(std::error::Error::source(&err).is_some());
    }
}
