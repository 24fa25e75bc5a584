//! Vigil candidate monitor: keeps a live copy of the network's candidate
//! list and tells owners when their operator stops validating.
//!
//! The monitor is the central coordinator that:
//! - Polls the node API on a fixed interval, falling back to a secondary node
//! - Replaces the in-process snapshot atomically on every successful poll
//! - Evaluates watched operators against the snapshot and notifies owners
//! - Optionally serves the snapshot read-only over HTTP
//!
//! Candidate switch transactions are built and submitted through
//! [`build_activation_service`], independently of the poll cycle.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod metrics;
pub mod monitor;
pub mod poller;
pub mod shutdown;
pub mod snapshot;
pub mod tracing_spans;

pub use collaborators::{LogNotifier, StaticDirectory};
pub use config::MonitorConfig;
pub use error::{MonitorError, PollError};
pub use evaluator::{alert_for, EvaluationReport, Evaluator};
pub use logging::{init_logging, LogFormat};
pub use metrics::MonitorMetrics;
pub use monitor::{build_activation_service, node_clients, Monitor, MonitorDeps};
pub use poller::{candidate_from_entry, Poller};
pub use shutdown::ShutdownController;
pub use snapshot::{Snapshot, SnapshotStore};
