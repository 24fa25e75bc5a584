//! Built-in collaborators for running the monitor standalone: a directory
//! backed by the configured watch list, and a notifier that writes alerts
//! to the log.

use async_trait::async_trait;
use tracing::warn;
use vigil_ports::{Notifier, PortError, UserDirectory};
use vigil_types::{OwnerId, WatchedOperator};

/// Serves a fixed list of watched operators.
pub struct StaticDirectory {
    operators: Vec<WatchedOperator>,
}

impl StaticDirectory {
    pub fn new(operators: Vec<WatchedOperator>) -> Self {
        Self { operators }
    }
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn list_watched_operators(&self) -> Result<Vec<WatchedOperator>, PortError> {
        Ok(self.operators.clone())
    }
}

/// Emits each alert as a `warn` event with the owner attached.
#[derive(Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, owner: OwnerId, message: &str) -> Result<(), PortError> {
        warn!(target: "vigil::alert", owner = %owner, "{message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::PublicKey;

    #[tokio::test]
    async fn static_directory_returns_configured_list() {
        let op = WatchedOperator::new(OwnerId(5), PublicKey::new("MpAA"));
        let directory = StaticDirectory::new(vec![op]);
        let listed = directory.list_watched_operators().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].owner, OwnerId(5));
    }

    #[tokio::test]
    async fn log_notifier_never_fails() {
        assert!(LogNotifier.notify(OwnerId(1), "hello").await.is_ok());
    }
}
