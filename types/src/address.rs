//! Account address type with `Mx` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VigilError;

/// An account address: `Mx` followed by 20 hex-encoded bytes.
///
/// Derived from the account's public key as the last 20 bytes of the
/// Keccak-256 hash of the uncompressed key (see `vigil_crypto::derive_address`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The standard prefix for all account addresses.
    pub const PREFIX: &'static str = "Mx";

    /// Length of the raw address in bytes.
    pub const LENGTH: usize = 20;

    /// Parse and validate an address string.
    pub fn parse(raw: &str) -> Result<Self, VigilError> {
        let body = raw
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| VigilError::MalformedAddress(format!("{raw}: missing Mx prefix")))?;
        let bytes =
            hex::decode(body).map_err(|e| VigilError::MalformedAddress(format!("{raw}: {e}")))?;
        if bytes.len() != Self::LENGTH {
            return Err(VigilError::MalformedAddress(format!(
                "{raw}: expected {} bytes, got {}",
                Self::LENGTH,
                bytes.len()
            )));
        }
        Ok(Self(format!("{}{}", Self::PREFIX, body.to_lowercase())))
    }

    /// Build an address from its raw 20 bytes.
    pub fn from_bytes(bytes: &[u8; 20]) -> Self {
        Self(format!("{}{}", Self::PREFIX, hex::encode(bytes)))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = VigilError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "Mx31e61a05adbd13c6b625262704bc305bf7725026";

    #[test]
    fn parse_valid() {
        let a = Address::parse(ADDR).unwrap();
        assert_eq!(a.as_str(), ADDR);
    }

    #[test]
    fn parse_normalizes_case() {
        let upper = format!("Mx{}", ADDR[2..].to_uppercase());
        assert_eq!(Address::parse(&upper).unwrap().as_str(), ADDR);
    }

    #[test]
    fn missing_prefix_rejected() {
        assert!(Address::parse("31e61a05adbd13c6b625262704bc305bf7725026").is_err());
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(Address::parse("Mx31e61a").is_err());
        assert!(Address::parse("Mx").is_err());
    }

    #[test]
    fn from_bytes_roundtrip() {
        let a = Address::from_bytes(&[0xab; 20]);
        assert_eq!(Address::parse(a.as_str()).unwrap(), a);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<Address, _> = serde_json::from_str(&format!("\"{ADDR}\""));
        assert!(ok.is_ok());
        let bad: Result<Address, _> = serde_json::from_str("\"Mxnothex\"");
        assert!(bad.is_err());
    }
}
