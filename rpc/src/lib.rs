//! Read-only HTTP status server for the candidate monitor.
//!
//! Provides endpoints for:
//! - Liveness and snapshot freshness (`/health`)
//! - Prometheus metrics (`/metrics`)
//! - Candidate search (`/candidates?search=`)
//! - Candidate lookup by public key (`/candidates/:pub_key`)
//!
//! The server never touches the node API; it only reads the snapshot
//! through [`SnapshotView`].

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{RpcServer, RpcState};

use vigil_types::{Candidate, Timestamp};

/// Read access to the live candidate snapshot.
pub trait SnapshotView: Send + Sync {
    /// Generation of the live snapshot; 0 before the first successful poll.
    fn generation(&self) -> u64;

    /// When the live snapshot was taken.
    fn taken_at(&self) -> Option<Timestamp>;

    /// `(candidates, validators)` in the live snapshot.
    fn counts(&self) -> (usize, usize);

    fn find(&self, pub_key: &str) -> Option<Candidate>;

    /// Case-insensitive substring search over public keys, snapshot order.
    fn search(&self, needle: &str) -> Vec<Candidate>;
}
