//! Transaction submission and response interpretation.

use std::sync::Arc;

use vigil_ports::{NodeApi, PortError};

use crate::error::TxError;

/// Code reported for a response body that could not be decoded.
pub const MALFORMED_RESPONSE_CODE: i64 = -1;

/// Posts encoded transactions to the node.
#[derive(Clone)]
pub struct TransactionSubmitter {
    api: Arc<dyn NodeApi>,
}

impl TransactionSubmitter {
    pub fn new(api: Arc<dyn NodeApi>) -> Self {
        Self { api }
    }

    /// Submit `tx_hex` once and return the transaction hash the node assigned.
    pub async fn submit(&self, tx_hex: &str) -> Result<String, TxError> {
        match self.api.send_transaction(tx_hex).await {
            Ok(resp) if resp.code == 0 => Ok(resp.result.hash),
            Ok(resp) => Err(TxError::Rejected {
                code: resp.code,
                log: resp.log,
            }),
            Err(PortError::InvalidResponse(e)) => Err(TxError::Rejected {
                code: MALFORMED_RESPONSE_CODE,
                log: e,
            }),
            Err(e) => Err(TxError::Unreachable(e.to_string())),
        }
    }
}
