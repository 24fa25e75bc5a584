//! Request handlers and response bodies.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use vigil_types::{Candidate, CandidateStatus, Timestamp};
use vigil_utils::format_duration;

use crate::error::RpcError;
use crate::server::RpcState;

/// Longest accepted search string.
const MAX_SEARCH_LEN: usize = 66;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub uptime: String,
    pub generation: u64,
    pub candidates: usize,
    pub validators: usize,
    /// Seconds since the live snapshot was taken; absent before the first poll.
    pub snapshot_age_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

/// One row of a search result.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub pub_key: String,
    pub status: CandidateStatus,
    pub commission: u32,
    pub total_stake: f64,
}

impl From<&Candidate> for CandidateSummary {
    fn from(c: &Candidate) -> Self {
        Self {
            pub_key: c.pub_key.to_string(),
            status: c.status,
            commission: c.commission,
            total_stake: c.total_stake_display,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: usize,
    pub candidates: Vec<CandidateSummary>,
}

pub async fn health(State(state): State<Arc<RpcState>>) -> Json<HealthResponse> {
    let now = Timestamp::now();
    let uptime_secs = state.started_at.elapsed_since(now);
    let (candidates, validators) = state.snapshot.counts();
    Json(HealthResponse {
        status: "ok".into(),
        uptime_secs,
        uptime: format_duration(uptime_secs),
        generation: state.snapshot.generation(),
        candidates,
        validators,
        snapshot_age_secs: state.snapshot.taken_at().map(|t| t.elapsed_since(now)),
    })
}

pub async fn metrics(State(state): State<Arc<RpcState>>) -> Result<impl IntoResponse, RpcError> {
    let registry = state
        .metrics_registry
        .as_ref()
        .ok_or(RpcError::MetricsUnavailable)?;
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder
        .encode(&registry.gather(), &mut buf)
        .map_err(|e| RpcError::Server(e.to_string()))?;
    let body = String::from_utf8(buf).map_err(|e| RpcError::Server(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], body))
}

pub async fn search_candidates(
    State(state): State<Arc<RpcState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, RpcError> {
    if params.search.len() > MAX_SEARCH_LEN {
        return Err(RpcError::InvalidRequest(format!(
            "search string longer than {MAX_SEARCH_LEN} characters"
        )));
    }
    let found = state.snapshot.search(&params.search);
    Ok(Json(SearchResponse {
        count: found.len(),
        candidates: found.iter().map(CandidateSummary::from).collect(),
    }))
}

pub async fn candidate(
    State(state): State<Arc<RpcState>>,
    Path(pub_key): Path<String>,
) -> Result<Json<Candidate>, RpcError> {
    state
        .snapshot
        .find(&pub_key)
        .map(Json)
        .ok_or(RpcError::CandidateNotFound(pub_key))
}
