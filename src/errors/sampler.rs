// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for block-range sampling.

use super::{RpcError, UnitError};

/// Errors that can occur while sampling balances over a block range.
///
/// Any failing request fails the whole wave; there are no partial results.
///
/// # Examples
///
/// ```rust
/// use balancegraph::SamplerError;
///
/// let err = SamplerError::invalid_range(10, 10);
/// assert_eq!(err.to_string(), "Invalid block range: end 10 is not after start 10");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    /// `end <= start`.
    #[error("Invalid block range: end {end} is not after start {start}")]
    InvalidRange {
        /// First block of the range
        start: u64,
        /// Exclusive end of the range
        end: u64,
    },

    /// A sampled block has no cached hash after the hash wave.
    #[error("No cached hash for block {block_number}")]
    MissingBlockHash {
        /// The block with no hash
        block_number: u64,
    },

    /// A balance could not be converted.
    #[error("Balance conversion failed at block {block_number}")]
    Units {
        /// The block whose balance failed
        block_number: u64,
        /// The conversion error
        #[source]
        source: UnitError,
    },

    /// RPC failure during either wave.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl SamplerError {
    /// Create an `InvalidRange` error.
    pub fn invalid_range(start: u64, end: u64) -> Self {
        SamplerError::InvalidRange { start, end }
    }
}
