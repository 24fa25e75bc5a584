//! The watched-operator record supplied by the user directory.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::keys::PublicKey;

/// Identifies the owner an alert is addressed to (for example a chat id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An owner's binding to the operator they watch.
///
/// Owned by the user directory. This crate only reads it: for alert
/// evaluation, and as the parameter set for building switch transactions.
#[derive(Clone, Serialize, Deserialize)]
pub struct WatchedOperator {
    pub owner: OwnerId,
    pub pub_key: PublicKey,
    /// Account that pays for and signs switch transactions.
    #[serde(default)]
    pub address: Option<Address>,
    /// Hex-encoded secret key of `address`. Read from config, never written.
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,
    #[serde(default = "default_alerts")]
    pub alerts_enabled: bool,
}

fn default_alerts() -> bool {
    true
}

impl WatchedOperator {
    pub fn new(owner: OwnerId, pub_key: PublicKey) -> Self {
        Self {
            owner,
            pub_key,
            address: None,
            private_key: None,
            alerts_enabled: true,
        }
    }
}

impl fmt::Debug for WatchedOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchedOperator")
            .field("owner", &self.owner)
            .field("pub_key", &self.pub_key)
            .field("address", &self.address)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("alerts_enabled", &self.alerts_enabled)
            .finish()
    }
}
