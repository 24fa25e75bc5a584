//! Node API trait and its JSON payloads.
//!
//! Payloads mirror the node's JSON exactly; numeric amounts stay strings
//! here and are parsed by the consumer. Every endpoint wraps its result in
//! `{code, result, log}`, where a non-zero `code` means the node refused.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vigil_types::Address;

use crate::error::PortError;

/// The node endpoints the monitor needs.
///
/// Implementations return the decoded body as-is. Interpreting `code` is
/// left to the caller, because a non-zero code means different things per
/// endpoint.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Base URL or label used in logs.
    fn endpoint(&self) -> &str;

    /// `GET /api/validators`
    async fn validators(&self) -> Result<ValidatorsResponse, PortError>;

    /// `GET /api/transactionCount/{address}`
    async fn transaction_count(
        &self,
        address: &Address,
    ) -> Result<TransactionCountResponse, PortError>;

    /// `POST /api/sendTransaction`
    async fn send_transaction(&self, tx_hex: &str) -> Result<SendTransactionResponse, PortError>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorsResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub result: Vec<ValidatorEntry>,
    #[serde(default)]
    pub log: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidatorEntry {
    #[serde(default)]
    pub accumulated_reward: String,
    #[serde(default)]
    pub absent_times: u64,
    pub candidate: CandidateEntry,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub candidate_address: String,
    #[serde(default)]
    pub total_stake: String,
    pub pub_key: String,
    #[serde(default)]
    pub commission: u32,
    #[serde(default)]
    pub created_at_block: u64,
    pub status: i64,
    #[serde(default)]
    pub stakes: Vec<StakeEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StakeEntry {
    pub owner: String,
    pub coin: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub bip_value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionCountResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub result: TransactionCountResult,
    #[serde(default)]
    pub log: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionCountResult {
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SendTransactionResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub result: SendTransactionResult,
    #[serde(default)]
    pub log: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SendTransactionResult {
    #[serde(default)]
    pub hash: String,
}
