//! Status server error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("candidate not found: {0}")]
    CandidateNotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("metrics unavailable")]
    MetricsUnavailable,

    #[error("server error: {0}")]
    Server(String),
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::CandidateNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::MetricsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
