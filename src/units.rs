// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point balance to display-unit conversion
//!
//! Balances come off the chain as integers scaled by `10^decimals`. Dividing
//! as floats would round away the low digits of large balances before the
//! division, so the integer and fractional parts are split with integer
//! arithmetic and only the joined decimal string is parsed as `f64`.
//!
//! # Examples
//!
//! ```
//! use alloy_primitives::U256;
//! use balancegraph::{to_display_units, TokenDecimals};
//!
//! let value = to_display_units(U256::from(1_234_500_000u64), TokenDecimals::new(9)).unwrap();
//! assert_eq!(value, 1.2345);
//! ```

use alloy_primitives::U256;

use crate::errors::UnitError;
use crate::types::decimals::TokenDecimals;

/// Converts `balance / 10^decimals` to `f64`
///
/// The remainder is zero-padded to `decimals` digits before being joined to
/// the integer part, so `1_000_000_005` with 9 decimals reads `1.000000005`.
pub fn to_display_units(balance: U256, decimals: TokenDecimals) -> Result<f64, UnitError> {
    let digits = decimals.as_u8();
    if digits == 0 {
        return parse_decimal(balance.to_string());
    }
    if digits > TokenDecimals::MAX {
        return Err(UnitError::DecimalsOutOfRange { decimals: digits });
    }

    let divisor = U256::from(10u8).pow(U256::from(digits));
    let (integer, remainder) = balance.div_rem(divisor);
    let width = usize::from(digits);
    let fraction = remainder.to_string();

    parse_decimal(format!("{integer}.{fraction:0>width$}"))
}

fn parse_decimal(value: String) -> Result<f64, UnitError> {
    value
        .parse::<f64>()
        .map_err(|_| UnitError::Unparseable { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nine_decimals() {
        let value = to_display_units(U256::from(1_234_500_000u64), TokenDecimals::new(9)).unwrap();
        assert_eq!(value, 1.2345);
    }

    #[test]
    fn test_remainder_is_zero_padded() {
        let value = to_display_units(U256::from(1_000_000_005u64), TokenDecimals::new(9)).unwrap();
        assert_eq!(value, 1.000000005);

        let value = to_display_units(U256::from(5u64), TokenDecimals::new(3)).unwrap();
        assert_eq!(value, 0.005);
    }

    #[test]
    fn test_zero_decimals() {
        let value = to_display_units(U256::from(42u64), TokenDecimals::new(0)).unwrap();
        assert_eq!(value, 42.0);
    }

    #[test]
    fn test_zero_balance() {
        let value = to_display_units(U256::ZERO, TokenDecimals::KUSAMA).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_one_ether() {
        let wei = U256::from(10u8).pow(U256::from(18u8));
        let value = to_display_units(wei, TokenDecimals::ETHER).unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_decimals_out_of_range() {
        let err = to_display_units(U256::from(1u8), TokenDecimals::new(78)).unwrap_err();
        assert_eq!(err, UnitError::DecimalsOutOfRange { decimals: 78 });
    }
}
