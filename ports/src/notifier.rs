use async_trait::async_trait;
use vigil_types::OwnerId;

use crate::error::PortError;

/// Delivers a rendered alert to an owner.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, owner: OwnerId, message: &str) -> Result<(), PortError>;
}
