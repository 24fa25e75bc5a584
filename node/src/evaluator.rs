//! Alert decisions for watched operators.

use std::sync::Arc;

use tracing::{debug, info, warn, Instrument};
use vigil_ports::{Notifier, PortError, UserDirectory};
use vigil_types::{StatusOf, WatchedOperator};
use vigil_utils::shorten;

use crate::metrics::MonitorMetrics;
use crate::snapshot::SnapshotStore;
use crate::tracing_spans::evaluation_span;

/// Outcome of one evaluation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Operators with alerting enabled that were checked.
    pub watched: usize,
    /// Alerts handed to the notifier successfully.
    pub alerts: usize,
    /// Alerts the notifier failed to deliver.
    pub failures: usize,
}

/// Text of the alert for an operator in `status`, or `None` when it is a
/// validator.
pub fn alert_for(operator: &WatchedOperator, status: StatusOf) -> Option<String> {
    let key = shorten(operator.pub_key.as_str());
    match status {
        StatusOf::Validator => None,
        StatusOf::Candidate => Some(format!(
            "Node {key} is not in the validator set: it is listed as a candidate."
        )),
        StatusOf::Absent => Some(format!(
            "Node {key} is not in the validator set: it is missing from the candidate list."
        )),
    }
}

/// Compares watched operators against the live snapshot and notifies the
/// owners of those that are not validating.
///
/// Nothing is remembered between passes: an operator that stays out of the
/// validator set for N cycles produces N alerts.
pub struct Evaluator {
    store: Arc<SnapshotStore>,
    directory: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
    metrics: Option<Arc<MonitorMetrics>>,
}

impl Evaluator {
    pub fn new(
        store: Arc<SnapshotStore>,
        directory: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            directory,
            notifier,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<MonitorMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run one pass. Fails only when the directory cannot be read; notifier
    /// failures are counted and delivery continues with the next owner.
    pub async fn evaluate(&self) -> Result<EvaluationReport, PortError> {
        let snapshot = self.store.current();
        async {
            let operators = self.directory.list_watched_operators().await?;
            let mut report = EvaluationReport::default();

            for operator in operators.iter().filter(|op| op.alerts_enabled) {
                report.watched += 1;
                let status = StatusOf::from(snapshot.find(operator.pub_key.as_str()).map(|c| c.status));
                let Some(message) = alert_for(operator, status) else {
                    continue;
                };

                match self.notifier.notify(operator.owner, &message).await {
                    Ok(()) => {
                        report.alerts += 1;
                        if let Some(m) = &self.metrics {
                            m.alerts_sent_total.inc();
                        }
                        info!(owner = %operator.owner, pub_key = %operator.pub_key, ?status, "alert sent");
                    }
                    Err(e) => {
                        report.failures += 1;
                        if let Some(m) = &self.metrics {
                            m.alert_failures_total.inc();
                        }
                        warn!(owner = %operator.owner, pub_key = %operator.pub_key, error = %e, "alert delivery failed");
                    }
                }
            }

            debug!(watched = report.watched, alerts = report.alerts, "evaluation done");
            Ok::<_, PortError>(report)
        }
        .instrument(evaluation_span(snapshot.generation))
        .await
    }
}
