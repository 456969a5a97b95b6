// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! 32-byte Substrate account ids and SS58 decoding

use std::fmt;
use std::str::FromStr;

use alloy_primitives::hex;
use blake2::{Blake2b512, Digest};

use crate::errors::AddressError;

const SS58_PREFIX: &[u8] = b"SS58PRE";
const CHECKSUM_LEN: usize = 2;

/// A Substrate account id
///
/// Parses from SS58 (any network prefix, checksum verified) or from
/// 0x-prefixed hex; displays as hex.
///
/// # Examples
///
/// ```
/// use balancegraph::source::AccountId32;
///
/// let alice: AccountId32 = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".parse().unwrap();
/// assert_eq!(
///     alice.to_string(),
///     "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId32([u8; 32]);

impl AccountId32 {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn from_hex(raw: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(raw).map_err(|e| AddressError::invalid_hex(raw, e.to_string()))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            AddressError::invalid_hex(raw, format!("expected 32 bytes, got {}", b.len()))
        })?;
        Ok(Self(bytes))
    }

    fn from_ss58(raw: &str) -> Result<Self, AddressError> {
        let data = bs58::decode(raw)
            .into_vec()
            .map_err(|e| AddressError::invalid_ss58(raw, e.to_string()))?;

        let prefix_len = match data.first() {
            Some(0..=63) => 1,
            Some(64..=127) => 2,
            Some(b) => {
                return Err(AddressError::invalid_ss58(
                    raw,
                    format!("reserved prefix byte {b}"),
                ))
            }
            None => return Err(AddressError::Empty),
        };
        if data.len() != prefix_len + 32 + CHECKSUM_LEN {
            return Err(AddressError::invalid_ss58(
                raw,
                format!("unexpected length {}", data.len()),
            ));
        }

        let (body, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
        let digest = Blake2b512::new()
            .chain_update(SS58_PREFIX)
            .chain_update(body)
            .finalize();
        if digest[..CHECKSUM_LEN] != *checksum {
            return Err(AddressError::invalid_ss58(raw, "checksum mismatch"));
        }

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&body[prefix_len..]);
        Ok(Self(bytes))
    }
}

impl FromStr for AccountId32 {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(AddressError::Empty);
        }
        if raw.starts_with("0x") {
            Self::from_hex(raw)
        } else {
            Self::from_ss58(raw)
        }
    }
}

impl fmt::Display for AccountId32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId32({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_SS58: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const ALICE_HEX: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

    #[test]
    fn test_ss58_and_hex_agree() {
        let from_ss58: AccountId32 = ALICE_SS58.parse().unwrap();
        let from_hex: AccountId32 = ALICE_HEX.parse().unwrap();
        assert_eq!(from_ss58, from_hex);
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // last character changed
        let err = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQZ"
            .parse::<AccountId32>()
            .unwrap_err();
        assert!(matches!(err, AddressError::InvalidSs58 { .. }));
    }

    #[test]
    fn test_short_hex_rejected() {
        let err = "0xd435".parse::<AccountId32>().unwrap_err();
        assert!(matches!(err, AddressError::InvalidHex { .. }));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!("  ".parse::<AccountId32>().unwrap_err(), AddressError::Empty);
    }
}
