use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("public key recovery failed: {0}")]
    Recovery(String),
}
