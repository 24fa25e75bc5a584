use thiserror::Error;
use vigil_types::Address;

/// Terminal outcome of one activation request. Never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("nonce unavailable: {0}")]
    NonceUnavailable(String),

    #[error("malformed candidate key: {0}")]
    MalformedKey(String),

    #[error("malformed payer address: {0}")]
    MalformedAddress(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("signing key controls {derived}, not payer {expected}")]
    KeyMismatch { expected: Address, derived: Address },

    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    #[error("node unreachable: {0}")]
    Unreachable(String),

    #[error("node rejected transaction (code {code}): {log}")]
    Rejected { code: i64, log: String },
}

impl TxError {
    /// Node response code for rejections, for logging and metrics.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}
