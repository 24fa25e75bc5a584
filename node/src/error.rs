use thiserror::Error;
use vigil_ports::PortError;

/// Why a poll produced no snapshot. The live snapshot is kept either way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("validator list unreachable (primary: {primary}; secondary: {})", .secondary.as_deref().unwrap_or("not configured"))]
    Unreachable {
        primary: String,
        secondary: Option<String>,
    },

    #[error("malformed validator entry: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("config error: {0}")]
    Config(String),

    #[error("poll failed: {0}")]
    Poll(#[from] PollError),

    #[error("user directory unavailable: {0}")]
    Directory(PortError),

    #[error("node client error: {0}")]
    Client(PortError),

    #[error("logging already initialised: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
