// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors for shareable query strings.

/// A shareable link that could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The link is not a URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Parser message
        reason: String,
    },

    /// A block parameter is not a non-negative integer.
    #[error("Invalid block number for '{key}': {value}")]
    InvalidBlockNumber {
        /// Query key (`start` or `end`)
        key: &'static str,
        /// The rejected value
        value: String,
    },
}
