//! Nullable notifier: record alerts instead of delivering them.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use vigil_ports::{Notifier, PortError};
use vigil_types::OwnerId;

/// Records every delivered `(owner, message)` pair in order.
#[derive(Default)]
pub struct NullNotifier {
    delivered: Mutex<Vec<(OwnerId, String)>>,
    failing_owners: Mutex<HashSet<OwnerId>>,
}

impl NullNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries to `owner` fail from now on.
    pub fn fail_for(&self, owner: OwnerId) {
        self.failing_owners.lock().unwrap().insert(owner);
    }

    /// Get all delivered alerts (for assertions).
    pub fn delivered(&self) -> Vec<(OwnerId, String)> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn delivered_to(&self, owner: OwnerId) -> Vec<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, _)| *o == owner)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Clear all state.
    pub fn reset(&self) {
        self.delivered.lock().unwrap().clear();
        self.failing_owners.lock().unwrap().clear();
    }
}

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, owner: OwnerId, message: &str) -> Result<(), PortError> {
        if self.failing_owners.lock().unwrap().contains(&owner) {
            return Err(PortError::Unavailable(format!("owner {owner} unreachable")));
        }
        self.delivered
            .lock()
            .unwrap()
            .push((owner, message.to_string()));
        Ok(())
    }
}
