// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors for parsing account addresses.

/// An address string that is not valid for the connected chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The address was empty.
    #[error("Address is empty")]
    Empty,

    /// Hex decoding failed or produced the wrong length.
    #[error("Invalid hex address '{address}': {reason}")]
    InvalidHex {
        /// The rejected input
        address: String,
        /// Why it was rejected
        reason: String,
    },

    /// SS58 decoding failed.
    #[error("Invalid SS58 address '{address}': {reason}")]
    InvalidSs58 {
        /// The rejected input
        address: String,
        /// Why it was rejected
        reason: String,
    },
}

impl AddressError {
    /// Create an `InvalidHex` error.
    pub fn invalid_hex(address: impl Into<String>, reason: impl Into<String>) -> Self {
        AddressError::InvalidHex {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create an `InvalidSs58` error.
    pub fn invalid_ss58(address: impl Into<String>, reason: impl Into<String>) -> Self {
        AddressError::InvalidSs58 {
            address: address.into(),
            reason: reason.into(),
        }
    }
}
