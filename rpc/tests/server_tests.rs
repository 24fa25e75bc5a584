use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use vigil_rpc::handlers::{HealthResponse, SearchResponse};
use vigil_rpc::{RpcServer, RpcState, SnapshotView};
use vigil_types::{Address, Candidate, CandidateStatus, PublicKey, Timestamp, TokenAmount};

struct FixedView {
    candidates: Vec<Candidate>,
}

impl SnapshotView for FixedView {
    fn generation(&self) -> u64 {
        3
    }

    fn taken_at(&self) -> Option<Timestamp> {
        Some(Timestamp::new(1))
    }

    fn counts(&self) -> (usize, usize) {
        let validators = self.candidates.iter().filter(|c| c.is_validator()).count();
        (self.candidates.len(), validators)
    }

    fn find(&self, pub_key: &str) -> Option<Candidate> {
        self.candidates
            .iter()
            .find(|c| c.pub_key.as_str() == pub_key)
            .cloned()
    }

    fn search(&self, needle: &str) -> Vec<Candidate> {
        let needle = needle.to_uppercase();
        self.candidates
            .iter()
            .filter(|c| c.pub_key.contains_ignore_case(&needle))
            .cloned()
            .collect()
    }
}

fn candidate(key: &str, status: CandidateStatus) -> Candidate {
    Candidate {
        pub_key: PublicKey::new(key),
        candidate_address: Address::from_bytes(&[9; 20]),
        total_stake: TokenAmount::new(1_000_000_000_000_000_000),
        total_stake_display: 1.0,
        commission: 10,
        created_at_block: 5,
        status,
        stakes: Vec::new(),
        accumulated_reward: TokenAmount::ZERO,
        accumulated_reward_display: 0.0,
        absent_times: 0,
        refreshed_at: Timestamp::new(1),
    }
}

fn state(registry: Option<prometheus::Registry>) -> Arc<RpcState> {
    Arc::new(RpcState {
        started_at: Timestamp::now(),
        snapshot: Arc::new(FixedView {
            candidates: vec![
                candidate("Mpaaaa01", CandidateStatus::Validator),
                candidate("Mpbbbb02", CandidateStatus::Candidate),
                candidate("MpAAAA03", CandidateStatus::Candidate),
            ],
        }),
        metrics_registry: registry,
    })
}

async fn get(state: Arc<RpcState>, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = RpcServer::router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn health_reports_snapshot_counts() {
    let (status, body) = get(state(None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.generation, 3);
    assert_eq!(health.candidates, 3);
    assert_eq!(health.validators, 1);
    assert!(health.snapshot_age_secs.is_some());
}

#[tokio::test]
async fn search_is_case_insensitive_and_ordered() {
    let (status, body) = get(state(None), "/candidates?search=aaaa").await;
    assert_eq!(status, StatusCode::OK);
    let found: SearchResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(found.count, 2);
    assert_eq!(found.candidates[0].pub_key, "Mpaaaa01");
    assert_eq!(found.candidates[1].pub_key, "MpAAAA03");
}

#[tokio::test]
async fn search_without_match_is_empty() {
    let (_, body) = get(state(None), "/candidates?search=zzzz").await;
    let found: SearchResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(found.count, 0);
    assert!(found.candidates.is_empty());
}

#[tokio::test]
async fn overlong_search_is_bad_request() {
    let uri = format!("/candidates?search={}", "a".repeat(100));
    let (status, _) = get(state(None), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookup_by_key() {
    let (status, body) = get(state(None), "/candidates/Mpbbbb02").await;
    assert_eq!(status, StatusCode::OK);
    let found: Candidate = serde_json::from_slice(&body).unwrap();
    assert_eq!(found.status, CandidateStatus::Candidate);
    assert_eq!(found.total_stake.raw(), 1_000_000_000_000_000_000);

    let (status, _) = get(state(None), "/candidates/Mpnothere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_need_a_registry() {
    let (status, _) = get(state(None), "/metrics").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let registry = prometheus::Registry::new();
    let counter = prometheus::IntCounter::new("vigil_test_total", "test counter").unwrap();
    registry.register(Box::new(counter.clone())).unwrap();
    counter.inc();
    let (status, body) = get(state(Some(registry)), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("vigil_test_total 1"));
}
