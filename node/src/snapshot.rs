//! The live candidate snapshot.
//!
//! Writers build a complete [`Snapshot`] off to the side and swap it in with
//! [`SnapshotStore::replace`]. Readers clone the `Arc` under a read lock and
//! work on that handle, so a reader sees either the whole old list or the
//! whole new one.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vigil_rpc::SnapshotView;
use vigil_types::{Candidate, StatusOf, Timestamp};

/// The candidate list as of one successful poll.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub candidates: Vec<Candidate>,
    /// Assigned by the store on replace; 0 for the empty initial snapshot.
    pub generation: u64,
    pub taken_at: Option<Timestamp>,
}

impl Snapshot {
    pub fn new(candidates: Vec<Candidate>, taken_at: Timestamp) -> Self {
        Self {
            candidates,
            generation: 0,
            taken_at: Some(taken_at),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn validator_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_validator()).count()
    }

    pub fn find(&self, pub_key: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.pub_key.as_str() == pub_key)
    }

    /// Candidates whose key contains `needle`, ignoring case, in snapshot order.
    pub fn search(&self, needle: &str) -> Vec<&Candidate> {
        let needle = needle.to_uppercase();
        self.candidates
            .iter()
            .filter(|c| c.pub_key.contains_ignore_case(&needle))
            .collect()
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.candidates == other.candidates
    }
}

/// Shared owner of the live snapshot.
#[derive(Default)]
pub struct SnapshotStore {
    inner: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Arc<Snapshot>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Snapshot>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Swap in a new snapshot, returning the generation it was given.
    pub fn replace(&self, mut snapshot: Snapshot) -> u64 {
        let mut guard = self.write();
        snapshot.generation = guard.generation + 1;
        let generation = snapshot.generation;
        *guard = Arc::new(snapshot);
        generation
    }

    /// Handle to the live snapshot. Stays valid after later replacements.
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.read())
    }

    pub fn find_by_public_key(&self, pub_key: &str) -> Option<Candidate> {
        self.current().find(pub_key).cloned()
    }

    pub fn search(&self, needle: &str) -> Vec<Candidate> {
        let snapshot = self.current();
        snapshot.search(needle).into_iter().cloned().collect()
    }

    pub fn is_validator(&self, pub_key: &str) -> bool {
        self.current().find(pub_key).is_some_and(Candidate::is_validator)
    }

    pub fn status_of(&self, pub_key: &str) -> StatusOf {
        StatusOf::from(self.current().find(pub_key).map(|c| c.status))
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop the live snapshot. Polling never does this; only an explicit
    /// reset empties the store.
    pub fn reset(&self) {
        *self.write() = Arc::new(Snapshot::default());
    }
}

impl SnapshotView for SnapshotStore {
    fn generation(&self) -> u64 {
        SnapshotStore::generation(self)
    }

    fn taken_at(&self) -> Option<Timestamp> {
        self.read().taken_at
    }

    fn counts(&self) -> (usize, usize) {
        let snapshot = self.current();
        (snapshot.len(), snapshot.validator_count())
    }

    fn find(&self, pub_key: &str) -> Option<Candidate> {
        self.find_by_public_key(pub_key)
    }

    fn search(&self, needle: &str) -> Vec<Candidate> {
        SnapshotStore::search(self, needle)
    }
}
