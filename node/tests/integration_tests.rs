//! Integration tests wiring the monitor to in-memory collaborators:
//! node API → poller → snapshot → evaluator → notifier, plus the
//! activation path sharing the same node.

use std::sync::Arc;
use std::time::Duration;

use vigil_node::{build_activation_service, Monitor, MonitorConfig, MonitorDeps, MonitorError};
use vigil_nullables::{NullClock, NullDirectory, NullNodeApi, NullNotifier};
use vigil_ports::{CandidateEntry, NodeApi, PortError, ValidatorEntry, ValidatorsResponse};
use vigil_types::{Address, OwnerId, PublicKey, StatusOf, WatchedOperator};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OWN_KEY: &str = "Mp0eb98ea04ae466d8d38f490db3c99b3996a90e24243952ce9822c6dc1e2c1a43";
const OTHER_KEY: &str = "Mpaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const PAYER: &str = "Mx31e61a05adbd13c6b625262704bc305bf7725026";
const SECRET: &str = "07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142";

fn entry(key: &str, status: i64) -> ValidatorEntry {
    ValidatorEntry {
        accumulated_reward: "0".into(),
        absent_times: 0,
        candidate: CandidateEntry {
            candidate_address: PAYER.into(),
            total_stake: "1000000000000000000000".into(),
            pub_key: key.into(),
            commission: 10,
            created_at_block: 7,
            status,
            stakes: Vec::new(),
        },
    }
}

fn listing(entries: Vec<ValidatorEntry>) -> ValidatorsResponse {
    ValidatorsResponse {
        code: 0,
        result: entries,
        log: String::new(),
    }
}

struct Harness {
    monitor: Monitor,
    primary: Arc<NullNodeApi>,
    secondary: Arc<NullNodeApi>,
    directory: Arc<NullDirectory>,
    notifier: Arc<NullNotifier>,
}

fn harness(config: MonitorConfig) -> Harness {
    let primary = Arc::new(NullNodeApi::new("http://primary"));
    let secondary = Arc::new(NullNodeApi::new("http://secondary"));
    let directory = Arc::new(NullDirectory::new(vec![WatchedOperator::new(
        OwnerId(100),
        PublicKey::new(OWN_KEY),
    )]));
    let notifier = Arc::new(NullNotifier::new());
    let monitor = Monitor::new(
        config,
        MonitorDeps {
            primary: primary.clone(),
            secondary: Some(secondary.clone()),
            directory: directory.clone(),
            notifier: notifier.clone(),
            clock: Arc::new(NullClock::new(1_700_000_000)),
        },
    );
    Harness {
        monitor,
        primary,
        secondary,
        directory,
        notifier,
    }
}

// ---------------------------------------------------------------------------
// Poll + evaluate cycles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validator_produces_no_alert() {
    let h = harness(MonitorConfig::default());
    h.primary.set_validators(listing(vec![entry(OWN_KEY, 2), entry(OTHER_KEY, 1)]));

    let report = h.monitor.run_cycle().await.unwrap();
    assert_eq!(report.watched, 1);
    assert_eq!(report.alerts, 0);
    assert_eq!(h.monitor.store().status_of(OWN_KEY), StatusOf::Validator);
    assert!(h.notifier.delivered().is_empty());
}

#[tokio::test]
async fn demotion_alerts_every_cycle() {
    let h = harness(MonitorConfig::default());
    h.primary.set_validators(listing(vec![entry(OWN_KEY, 1)]));

    h.monitor.run_cycle().await.unwrap();
    h.monitor.run_cycle().await.unwrap();

    let alerts = h.notifier.delivered_to(OwnerId(100));
    assert_eq!(alerts.len(), 2);
    assert!(alerts[0].contains("Mp0eb9...1a43"));
    assert_eq!(h.monitor.store().generation(), 2);
}

#[tokio::test]
async fn secondary_serves_when_primary_down() {
    let h = harness(MonitorConfig::default());
    h.primary.fail_validators(PortError::Unreachable("connection refused".into()));
    h.secondary.set_validators(listing(vec![entry(OWN_KEY, 2)]));

    h.monitor.run_cycle().await.unwrap();
    assert!(h.monitor.store().is_validator(OWN_KEY));
    assert_eq!(h.monitor.metrics().poll_fallbacks_total.get(), 1);
}

#[tokio::test]
async fn failed_poll_keeps_snapshot_and_skips_alerts() {
    let h = harness(MonitorConfig::default());
    h.primary.set_validators(listing(vec![entry(OWN_KEY, 2)]));
    h.monitor.run_cycle().await.unwrap();

    h.primary.fail_validators(PortError::Status(502));
    h.secondary.fail_validators(PortError::Status(502));
    let err = h.monitor.run_cycle().await.unwrap_err();
    assert!(matches!(err, MonitorError::Poll(_)));

    assert_eq!(h.monitor.store().generation(), 1);
    assert!(h.monitor.store().is_validator(OWN_KEY));
    assert!(h.notifier.delivered().is_empty());
}

#[tokio::test]
async fn directory_outage_skips_evaluation_only() {
    let h = harness(MonitorConfig::default());
    h.primary.set_validators(listing(vec![entry(OTHER_KEY, 2)]));
    h.directory
        .set_failure(Some(PortError::Unavailable("directory offline".into())));

    let err = h.monitor.run_cycle().await.unwrap_err();
    assert!(matches!(err, MonitorError::Directory(_)));
    assert_eq!(h.monitor.store().len(), 1);
    assert!(h.notifier.delivered().is_empty());
}

// ---------------------------------------------------------------------------
// Background loop
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_polls_immediately_and_stops_on_shutdown() {
    let mut config = MonitorConfig::default();
    config.poll_interval_secs = 3600;
    let mut h = harness(config);
    h.primary.set_validators(listing(vec![entry(OWN_KEY, 1)]));

    h.monitor.start().await.unwrap();
    let store = h.monitor.store();
    for _ in 0..200 {
        if store.generation() > 0 && !h.notifier.delivered().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(store.generation(), 1);
    assert_eq!(h.notifier.delivered_to(OwnerId(100)).len(), 1);

    h.monitor.stop().await;
    assert_eq!(h.primary.validators_calls(), 1);
}

// ---------------------------------------------------------------------------
// Activation through the shared node
// ---------------------------------------------------------------------------

#[tokio::test]
async fn activation_uses_next_nonce() {
    let api = Arc::new(NullNodeApi::new("http://primary"));
    api.set_transaction_count(PAYER, 41);
    let service = build_activation_service(&MonitorConfig::default(), api.clone() as Arc<dyn NodeApi>);

    let mut operator = WatchedOperator::new(OwnerId(100), PublicKey::new(OWN_KEY));
    operator.address = Some(Address::parse(PAYER).unwrap());
    operator.private_key = Some(SECRET.into());

    let receipt = service.set_operator_state(&operator, true).await.unwrap();
    assert_eq!(receipt.nonce, 42);
    let sent = api.sent_transactions();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("f87c2a01018a424950"));
}

#[tokio::test]
async fn monitor_switches_through_primary_and_counts_outcomes() {
    let h = harness(MonitorConfig::default());
    h.primary.set_transaction_count(PAYER, 0);

    let receipt = h
        .monitor
        .set_candidate_state(PAYER, SECRET, &PublicKey::new(OWN_KEY), false)
        .await
        .unwrap();
    assert_eq!(receipt.nonce, 1);
    assert_eq!(
        h.primary.sent_transactions(),
        ["f87c0101018a424950000000000000000ba2e1a00eb98ea04ae466d8d38f490db3c99b3996a90e24243952ce9822c6dc1e2c1a43808001b845f8431ba045a4ba120cb52470b5fb6c2abd55d3b1828e76ba7eb97d2fe4d757a1b3446807a0358a2520b264be2f518e89efd793cbd86124bb27ae286deb4505a1bd93b7b7e9"]
    );
    assert!(h.secondary.sent_transactions().is_empty());

    let unbound = WatchedOperator::new(OwnerId(100), PublicKey::new(OWN_KEY));
    assert!(h.monitor.set_operator_state(&unbound, true).await.is_err());

    let metrics = h.monitor.metrics();
    assert_eq!(metrics.transactions_submitted_total.get(), 1);
    assert_eq!(metrics.transactions_failed_total.get(), 1);
}
