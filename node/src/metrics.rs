//! Prometheus metrics for the monitor.
//!
//! [`MonitorMetrics`] owns a dedicated [`Registry`] that the status server's
//! `/metrics` endpoint encodes into the Prometheus text format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Histogram, HistogramOpts, IntCounter, IntGauge, Opts,
    Registry,
};

use vigil_wallet_core::{ActivationReceipt, TxError};

pub struct MonitorMetrics {
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Poll attempts, successful or not.
    pub polls_total: IntCounter,
    /// Polls where neither endpoint produced a usable list.
    pub poll_failures_total: IntCounter,
    /// Polls answered by the secondary endpoint.
    pub poll_fallbacks_total: IntCounter,
    pub alerts_sent_total: IntCounter,
    pub alert_failures_total: IntCounter,
    /// Switch transactions accepted by the node.
    pub transactions_submitted_total: IntCounter,
    /// Switch transactions that failed to build or were rejected.
    pub transactions_failed_total: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    pub candidates: IntGauge,
    pub validators: IntGauge,
    pub snapshot_generation: IntGauge,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Wall time of a poll including any fallback, in milliseconds.
    pub poll_latency_ms: Histogram,
}

impl MonitorMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let polls_total = register_int_counter_with_registry!(
            Opts::new("vigil_polls_total", "Validator list polls attempted"),
            registry
        )
        .expect("failed to register polls_total counter");

        let poll_failures_total = register_int_counter_with_registry!(
            Opts::new(
                "vigil_poll_failures_total",
                "Polls where no endpoint returned a usable list"
            ),
            registry
        )
        .expect("failed to register poll_failures_total counter");

        let poll_fallbacks_total = register_int_counter_with_registry!(
            Opts::new(
                "vigil_poll_fallbacks_total",
                "Polls served by the secondary endpoint"
            ),
            registry
        )
        .expect("failed to register poll_fallbacks_total counter");

        let alerts_sent_total = register_int_counter_with_registry!(
            Opts::new("vigil_alerts_sent_total", "Alerts delivered to owners"),
            registry
        )
        .expect("failed to register alerts_sent_total counter");

        let alert_failures_total = register_int_counter_with_registry!(
            Opts::new(
                "vigil_alert_failures_total",
                "Alerts the notifier failed to deliver"
            ),
            registry
        )
        .expect("failed to register alert_failures_total counter");

        let transactions_submitted_total = register_int_counter_with_registry!(
            Opts::new(
                "vigil_transactions_submitted_total",
                "Candidate switch transactions accepted by the node"
            ),
            registry
        )
        .expect("failed to register transactions_submitted_total counter");

        let transactions_failed_total = register_int_counter_with_registry!(
            Opts::new(
                "vigil_transactions_failed_total",
                "Candidate switch transactions that failed or were rejected"
            ),
            registry
        )
        .expect("failed to register transactions_failed_total counter");

        let candidates = register_int_gauge_with_registry!(
            Opts::new("vigil_candidates", "Candidates in the live snapshot"),
            registry
        )
        .expect("failed to register candidates gauge");

        let validators = register_int_gauge_with_registry!(
            Opts::new("vigil_validators", "Validators in the live snapshot"),
            registry
        )
        .expect("failed to register validators gauge");

        let snapshot_generation = register_int_gauge_with_registry!(
            Opts::new("vigil_snapshot_generation", "Generation of the live snapshot"),
            registry
        )
        .expect("failed to register snapshot_generation gauge");

        // 1 ms → ~16 s
        let poll_latency_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "vigil_poll_latency_ms",
                "Validator list poll latency in milliseconds"
            )
            .buckets(prometheus::exponential_buckets(1.0, 2.0, 15).unwrap()),
            registry
        )
        .expect("failed to register poll_latency_ms histogram");

        Self {
            registry,
            polls_total,
            poll_failures_total,
            poll_fallbacks_total,
            alerts_sent_total,
            alert_failures_total,
            transactions_submitted_total,
            transactions_failed_total,
            candidates,
            validators,
            snapshot_generation,
            poll_latency_ms,
        }
    }

    /// Count the outcome of one switch transaction.
    pub fn record_activation(&self, outcome: &Result<ActivationReceipt, TxError>) {
        match outcome {
            Ok(_) => self.transactions_submitted_total.inc(),
            Err(_) => self.transactions_failed_total.inc(),
        }
    }

    pub fn set_snapshot(&self, generation: u64, candidates: usize, validators: usize) {
        self.snapshot_generation.set(generation as i64);
        self.candidates.set(candidates as i64);
        self.validators.set(validators as i64);
    }
}

impl Default for MonitorMetrics {
    fn default() -> Self {
        Self::new()
    }
}
