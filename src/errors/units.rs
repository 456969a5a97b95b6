// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors for converting fixed-point balances to display units.

/// A balance that could not be converted to a float.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// `10^decimals` does not fit the integer type.
    #[error("Decimals {decimals} out of range")]
    DecimalsOutOfRange {
        /// The offending decimals count
        decimals: u8,
    },

    /// The joined decimal string did not parse as a float.
    #[error("Cannot parse '{value}' as a decimal number")]
    Unparseable {
        /// The joined integer and fractional parts
        value: String,
    },
}
