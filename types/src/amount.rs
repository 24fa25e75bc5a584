//! Fixed-point token amounts.
//!
//! The node reports every balance as a base-10 integer string counted in the
//! smallest unit, 18 decimals below one whole coin. Amounts are kept exactly
//! as `u128`; only the display value is a float.
//!
//! The display value is an `f64`, so raw amounts above 2^53 units lose
//! precision once converted. That is accepted for display purposes; anything
//! that needs exact arithmetic uses [`TokenAmount::raw`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VigilError;

/// Raw units per whole coin (10^18).
pub const UNITS_PER_COIN: u128 = 1_000_000_000_000_000_000;

/// A token amount in raw units.
///
/// Serialized as the node does: a decimal string of raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse the node's decimal string form. An empty string is zero.
    pub fn from_decimal_str(raw: &str) -> Result<Self, VigilError> {
        if raw.is_empty() {
            return Ok(Self::ZERO);
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VigilError::MalformedAmount(raw.to_string()));
        }
        raw.parse::<u128>()
            .map(Self)
            .map_err(|_| VigilError::MalformedAmount(raw.to_string()))
    }

    /// Whole-coin value for display.
    pub fn to_display(&self) -> f64 {
        self.0 as f64 / UNITS_PER_COIN as f64
    }
}

impl FromStr for TokenAmount {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = VigilError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_decimal_str(&s)
    }
}

impl From<TokenAmount> for String {
    fn from(a: TokenAmount) -> Self {
        a.0.to_string()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNITS_PER_COIN;
        let frac = self.0 % UNITS_PER_COIN;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:018}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Convert a raw 18-decimal amount string to its display value.
///
/// `""` yields `0.0`; any other non-integer input is rejected.
pub fn to_display_amount(raw: &str) -> Result<f64, VigilError> {
    TokenAmount::from_decimal_str(raw).map(|a| a.to_display())
}
