//! The monitor: owns the snapshot, the poll loop and the optional status
//! server, and wires the node API and collaborators together.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::Instrument;

use vigil_ports::{NodeApi, Notifier, UserDirectory};
use vigil_rpc::{RpcServer, RpcState, SnapshotView};
use vigil_types::{Clock, PublicKey, SystemClock, WatchedOperator};
use vigil_wallet_core::{
    ActivationReceipt, ActivationService, NodeClient, TransactionBuilder, TransactionSubmitter,
    TxError,
};

use crate::collaborators::{LogNotifier, StaticDirectory};
use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::evaluator::{EvaluationReport, Evaluator};
use crate::metrics::MonitorMetrics;
use crate::poller::Poller;
use crate::shutdown::ShutdownController;
use crate::snapshot::SnapshotStore;
use crate::tracing_spans::poll_cycle_span;

/// Timeout for waiting on background tasks during shutdown.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// External pieces the monitor talks to.
pub struct MonitorDeps {
    pub primary: Arc<dyn NodeApi>,
    pub secondary: Option<Arc<dyn NodeApi>>,
    pub directory: Arc<dyn UserDirectory>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

pub struct Monitor {
    config: MonitorConfig,
    store: Arc<SnapshotStore>,
    poller: Arc<Poller>,
    evaluator: Arc<Evaluator>,
    activation: Arc<ActivationService>,
    metrics: Arc<MonitorMetrics>,
    clock: Arc<dyn Clock>,
    shutdown: ShutdownController,
    cycles: Arc<AtomicU64>,
    task_handles: Vec<JoinHandle<()>>,
}

impl Monitor {
    pub fn new(config: MonitorConfig, deps: MonitorDeps) -> Self {
        let store = Arc::new(SnapshotStore::new());
        let metrics = Arc::new(MonitorMetrics::new());
        let activation = build_activation_service(&config, deps.primary.clone());
        let poller = Poller::new(deps.primary, deps.secondary, deps.clock.clone())
            .with_metrics(metrics.clone());
        let evaluator = Evaluator::new(store.clone(), deps.directory, deps.notifier)
            .with_metrics(metrics.clone());

        Self {
            config,
            store,
            poller: Arc::new(poller),
            evaluator: Arc::new(evaluator),
            activation: Arc::new(activation),
            metrics,
            clock: deps.clock,
            shutdown: ShutdownController::new(),
            cycles: Arc::new(AtomicU64::new(0)),
            task_handles: Vec::new(),
        }
    }

    /// Standalone wiring: HTTP node clients, the configured watch list, and
    /// alerts written to the log.
    pub fn from_config(config: MonitorConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        let (primary, secondary) = node_clients(&config)?;
        let deps = MonitorDeps {
            primary,
            secondary,
            directory: Arc::new(StaticDirectory::new(config.watch.clone())),
            notifier: Arc::new(LogNotifier),
            clock: Arc::new(SystemClock),
        };
        Ok(Self::new(config, deps))
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<SnapshotStore> {
        self.store.clone()
    }

    pub fn metrics(&self) -> Arc<MonitorMetrics> {
        self.metrics.clone()
    }

    pub fn shutdown_controller(&self) -> &ShutdownController {
        &self.shutdown
    }

    /// Poll once and, if the snapshot was refreshed, evaluate alerts.
    pub async fn run_cycle(&self) -> Result<EvaluationReport, MonitorError> {
        run_cycle(&self.poller, &self.evaluator, &self.store, &self.cycles).await
    }

    /// Switch `target` on or off through the primary node, counting the
    /// outcome in the monitor's metrics.
    pub async fn set_candidate_state(
        &self,
        payer: &str,
        signing_key: &str,
        target: &PublicKey,
        activate: bool,
    ) -> Result<ActivationReceipt, TxError> {
        let outcome = self
            .activation
            .set_candidate_state(payer, signing_key, target, activate)
            .await;
        self.metrics.record_activation(&outcome);
        outcome
    }

    /// Same as [`set_candidate_state`](Self::set_candidate_state) with the
    /// credentials stored on the owner's binding.
    pub async fn set_operator_state(
        &self,
        operator: &WatchedOperator,
        activate: bool,
    ) -> Result<ActivationReceipt, TxError> {
        let outcome = self.activation.set_operator_state(operator, activate).await;
        self.metrics.record_activation(&outcome);
        outcome
    }

    /// Spawn the poll loop and, when enabled, the status server.
    ///
    /// The first poll happens immediately; later ones follow the configured
    /// interval. Failed cycles are logged and the loop carries on.
    pub async fn start(&mut self) -> Result<(), MonitorError> {
        tracing::info!(
            primary = %self.config.primary_url,
            secondary = ?self.config.secondary(),
            interval_secs = self.config.poll_interval_secs,
            "monitor starting"
        );

        let poller = Arc::clone(&self.poller);
        let evaluator = Arc::clone(&self.evaluator);
        let store = Arc::clone(&self.store);
        let cycles = Arc::clone(&self.cycles);
        let period = self.config.poll_interval();
        let mut shutdown_rx = self.shutdown.subscribe();

        let poll_handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => {
                        tracing::info!("poll loop shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match run_cycle(&poller, &evaluator, &store, &cycles).await {
                            Ok(report) => tracing::debug!(
                                watched = report.watched,
                                alerts = report.alerts,
                                failures = report.failures,
                                "cycle complete"
                            ),
                            Err(e) => tracing::warn!(error = %e, "cycle skipped"),
                        }
                    }
                }
            }
        });
        self.task_handles.push(poll_handle);

        if self.config.enable_status_server {
            let addr = self.config.status_addr()?;
            let state = Arc::new(RpcState {
                started_at: self.clock.now(),
                snapshot: self.store.clone() as Arc<dyn SnapshotView>,
                metrics_registry: Some(self.metrics.registry.clone()),
            });
            let server = RpcServer::with_state(addr, state);
            let mut shutdown_rx_rpc = self.shutdown.subscribe();

            let rpc_handle = tokio::spawn(async move {
                tokio::select! {
                    biased;
                    _ = shutdown_rx_rpc.recv() => {
                        tracing::info!("status server shutting down");
                    }
                    result = server.start() => {
                        match result {
                            Ok(()) => tracing::info!("status server exited"),
                            Err(e) => tracing::error!("status server error: {e}"),
                        }
                    }
                }
            });
            self.task_handles.push(rpc_handle);
        }

        Ok(())
    }

    /// Signal every task and wait for them to finish.
    pub async fn stop(&mut self) {
        tracing::info!("monitor stopping");
        self.shutdown.shutdown();

        let handles: Vec<JoinHandle<()>> = self.task_handles.drain(..).collect();
        let wait_all = async {
            for handle in handles {
                let _ = handle.await;
            }
        };
        if tokio::time::timeout(SHUTDOWN_TIMEOUT, wait_all).await.is_err() {
            tracing::warn!(
                "shutdown timeout ({:?}), some tasks may still be running",
                SHUTDOWN_TIMEOUT
            );
        }
        tracing::info!(cycles = self.cycles.load(Ordering::Relaxed), "monitor stopped");
    }
}

async fn run_cycle(
    poller: &Poller,
    evaluator: &Evaluator,
    store: &SnapshotStore,
    cycles: &AtomicU64,
) -> Result<EvaluationReport, MonitorError> {
    let cycle = cycles.fetch_add(1, Ordering::Relaxed) + 1;
    async {
        match poller.refresh(store).await {
            Ok(_) => evaluator.evaluate().await.map_err(MonitorError::Directory),
            Err(e) => Err(MonitorError::Poll(e)),
        }
    }
    .instrument(poll_cycle_span(cycle))
    .await
}

/// HTTP clients for the configured primary and secondary endpoints.
pub fn node_clients(
    config: &MonitorConfig,
) -> Result<(Arc<dyn NodeApi>, Option<Arc<dyn NodeApi>>), MonitorError> {
    let timeout = config.http_timeout();
    let primary: Arc<dyn NodeApi> =
        Arc::new(NodeClient::new(&config.primary_url, timeout).map_err(MonitorError::Client)?);
    let secondary = match config.secondary() {
        Some(url) => Some(
            Arc::new(NodeClient::new(url, timeout).map_err(MonitorError::Client)?)
                as Arc<dyn NodeApi>,
        ),
        None => None,
    };
    Ok((primary, secondary))
}

/// Activation service paying fees in the configured gas coin. Nonces and
/// submissions both go to `api`.
pub fn build_activation_service(config: &MonitorConfig, api: Arc<dyn NodeApi>) -> ActivationService {
    ActivationService::new(
        TransactionBuilder::new(api.clone(), config.chain_id, config.gas_price),
        TransactionSubmitter::new(api),
        config.gas_coin,
    )
}
