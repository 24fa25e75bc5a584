//! Candidate public keys and account private keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::VigilError;

/// A candidate (masternode) public key in its textual `Mp` form.
///
/// The text is kept exactly as the node reports it so that snapshot lookups
/// are exact string matches. [`PublicKey::to_bytes`] strips the network
/// prefix and decodes the 32 raw key bytes used on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    /// Human-readable network prefix of candidate keys.
    pub const PREFIX: &'static str = "Mp";

    /// Length of the raw key in bytes.
    pub const LENGTH: usize = 32;

    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the raw key bytes, stripping the `Mp` prefix if present.
    pub fn to_bytes(&self) -> Result<[u8; 32], VigilError> {
        let body = self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0);
        let bytes = hex::decode(body)
            .map_err(|e| VigilError::MalformedKey(format!("{}: {e}", self.0)))?;
        bytes.try_into().map_err(|v: Vec<u8>| {
            VigilError::MalformedKey(format!(
                "{}: expected {} bytes, got {}",
                self.0,
                Self::LENGTH,
                v.len()
            ))
        })
    }

    /// Case-insensitive substring match against the textual key.
    pub fn contains_ignore_case(&self, needle_upper: &str) -> bool {
        self.0.to_uppercase().contains(needle_upper)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PublicKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PublicKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A 32-byte secp256k1 secret key.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded key, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, VigilError> {
        let body = s.trim().trim_start_matches("0x");
        let mut bytes = hex::decode(body)
            .map_err(|e| VigilError::MalformedKey(format!("private key: {e}")))?;
        let key: Result<[u8; 32], _> = bytes.as_slice().try_into();
        let len = bytes.len();
        bytes.zeroize();
        key.map(Self)
            .map_err(|_| VigilError::MalformedKey(format!("private key: expected 32 bytes, got {len}")))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
