use thiserror::Error;
use vigil_crypto::CryptoError;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("malformed candidate key: {0}")]
    MalformedKey(String),

    #[error("transaction is not signed")]
    Unsigned,

    #[error("signing failed: {0}")]
    Signing(#[from] CryptoError),
}
