use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}
