use async_trait::async_trait;
use vigil_types::WatchedOperator;

use crate::error::PortError;

/// Read access to the owners' watch bindings.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every binding, in the directory's own order.
    async fn list_watched_operators(&self) -> Result<Vec<WatchedOperator>, PortError>;
}
