//! HTTP implementation of [`NodeApi`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use vigil_ports::{
    NodeApi, PortError, SendTransactionResponse, TransactionCountResponse, ValidatorsResponse,
};
use vigil_types::Address;

/// HTTP client for one node's REST API.
///
/// Wraps `reqwest::Client` with the node's base URL. Every request is
/// bounded by the configured timeout; there is no retry at this layer.
#[derive(Clone, Debug)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl NodeClient {
    /// Create a client for `base_url` (e.g. `https://node.example:8841`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PortError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| PortError::Unreachable(format!("failed to create HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| PortError::Unreachable(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PortError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PortError::Unreachable(format!("reading body failed: {e}")))?;
        serde_json::from_slice(&body).map_err(|e| PortError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl NodeApi for NodeClient {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn validators(&self) -> Result<ValidatorsResponse, PortError> {
        self.get_json("/api/validators").await
    }

    async fn transaction_count(
        &self,
        address: &Address,
    ) -> Result<TransactionCountResponse, PortError> {
        self.get_json(&format!("/api/transactionCount/{address}"))
            .await
    }

    /// Rejections may arrive with a non-2xx status, so the body is decoded
    /// regardless of status.
    async fn send_transaction(&self, tx_hex: &str) -> Result<SendTransactionResponse, PortError> {
        let response = self
            .http
            .post(self.url("/api/sendTransaction"))
            .json(&serde_json::json!({ "transaction": tx_hex }))
            .send()
            .await
            .map_err(|e| PortError::Unreachable(format!("request failed: {e}")))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| PortError::Unreachable(format!("reading body failed: {e}")))?;
        serde_json::from_slice(&body).map_err(|e| PortError::InvalidResponse(e.to_string()))
    }
}
