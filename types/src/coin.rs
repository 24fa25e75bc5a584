//! Coin ticker symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VigilError;

/// A coin ticker, stored the way the chain encodes it: 10 bytes, zero padded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoinSymbol([u8; CoinSymbol::LENGTH]);

impl CoinSymbol {
    /// Fixed on-chain width of a symbol.
    pub const LENGTH: usize = 10;

    /// The network's base coin.
    pub const BIP: Self = Self(*b"BIP\0\0\0\0\0\0\0");

    /// Parse a ticker. Symbols are 1..=10 ASCII alphanumerics, upper-cased.
    pub fn new(symbol: &str) -> Result<Self, VigilError> {
        let symbol = symbol.trim();
        if symbol.is_empty()
            || symbol.len() > Self::LENGTH
            || !symbol.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(VigilError::InvalidCoinSymbol(symbol.to_string()));
        }
        let mut bytes = [0u8; Self::LENGTH];
        for (dst, src) in bytes.iter_mut().zip(symbol.bytes()) {
            *dst = src.to_ascii_uppercase();
        }
        Ok(Self(bytes))
    }

    /// The zero-padded wire form.
    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// The ticker without padding.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(Self::LENGTH);
        // Only ASCII is ever written into the buffer.
        std::str::from_utf8(&self.0[..end]).unwrap_or_default()
    }
}

impl fmt::Display for CoinSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CoinSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoinSymbol({})", self.as_str())
    }
}

impl FromStr for CoinSymbol {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CoinSymbol {
    type Error = VigilError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<CoinSymbol> for String {
    fn from(c: CoinSymbol) -> Self {
        c.as_str().to_string()
    }
}
