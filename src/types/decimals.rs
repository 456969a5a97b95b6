// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain balance decimal precision type

use serde::{Deserialize, Serialize};

/// Power-of-ten scaling between integer balance units and display units
///
/// Chains report balances as fixed-point integers:
/// - Polkadot: 10 decimals
/// - Kusama: 12 decimals
/// - Ether: 18 decimals
///
/// # Examples
///
/// ```
/// use balancegraph::TokenDecimals;
///
/// assert_eq!(TokenDecimals::ETHER.as_u8(), 18);
/// assert_eq!(TokenDecimals::new(12).to_string(), "12 decimals");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Largest count whose `10^n` fits a `U256`
    pub const MAX: u8 = 77;

    /// Ether and most EVM native coins (18)
    pub const ETHER: Self = Self(18);

    /// DOT (10)
    pub const POLKADOT: Self = Self(10);

    /// KSM and the Substrate default (12)
    pub const KUSAMA: Self = Self(12);

    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}
