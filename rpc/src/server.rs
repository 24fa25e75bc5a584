//! Axum-based status server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use vigil_types::Timestamp;

use crate::error::RpcError;
use crate::handlers;
use crate::SnapshotView;

/// Shared state handed to every handler.
pub struct RpcState {
    pub started_at: Timestamp,
    pub snapshot: Arc<dyn SnapshotView>,
    /// Registry rendered at `/metrics`; the endpoint answers 503 without one.
    pub metrics_registry: Option<prometheus::Registry>,
}

pub struct RpcServer {
    addr: SocketAddr,
    state: Arc<RpcState>,
}

impl RpcServer {
    pub fn with_state(addr: SocketAddr, state: Arc<RpcState>) -> Self {
        Self { addr, state }
    }

    /// Build the router. Exposed separately so it can be served on any listener.
    pub fn router(state: Arc<RpcState>) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/metrics", get(handlers::metrics))
            .route("/candidates", get(handlers::search_candidates))
            .route("/candidates/:pub_key", get(handlers::candidate))
            .with_state(state)
    }

    /// Bind and serve until the future is dropped.
    pub async fn start(&self) -> Result<(), RpcError> {
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.addr)))?;
        tracing::info!(addr = %self.addr, "status server listening");
        axum::serve(listener, Self::router(self.state.clone()))
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}
