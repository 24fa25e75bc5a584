//! Nullable user directory: a fixed, replaceable list of watch bindings.

use std::sync::Mutex;

use async_trait::async_trait;
use vigil_ports::{PortError, UserDirectory};
use vigil_types::WatchedOperator;

#[derive(Default)]
pub struct NullDirectory {
    operators: Mutex<Vec<WatchedOperator>>,
    failure: Mutex<Option<PortError>>,
}

impl NullDirectory {
    pub fn new(operators: Vec<WatchedOperator>) -> Self {
        Self {
            operators: Mutex::new(operators),
            failure: Mutex::new(None),
        }
    }

    pub fn set_operators(&self, operators: Vec<WatchedOperator>) {
        *self.operators.lock().unwrap() = operators;
    }

    /// Make every subsequent listing fail with `err` (or succeed again with `None`).
    pub fn set_failure(&self, err: Option<PortError>) {
        *self.failure.lock().unwrap() = err;
    }
}

#[async_trait]
impl UserDirectory for NullDirectory {
    async fn list_watched_operators(&self) -> Result<Vec<WatchedOperator>, PortError> {
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.operators.lock().unwrap().clone())
    }
}
