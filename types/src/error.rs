//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while parsing or validating the fundamental types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VigilError {
    #[error("malformed amount: {0:?}")]
    MalformedAmount(String),

    #[error("malformed public key: {0}")]
    MalformedKey(String),

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    #[error("invalid coin symbol: {0:?}")]
    InvalidCoinSymbol(String),

    #[error("unknown chain: {0}")]
    UnknownChain(String),
}
