//! Nullable node API: programmable responses, recorded submissions.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use vigil_ports::{
    NodeApi, PortError, SendTransactionResponse, SendTransactionResult, TransactionCountResponse,
    TransactionCountResult, ValidatorsResponse,
};
use vigil_types::Address;

/// An in-memory node.
///
/// - `validators` returns the last programmed response (empty list by default)
/// - `transaction_count` returns the programmed count per address (0 by default)
/// - `send_transaction` pops queued responses, accepting with a synthetic
///   hash once the queue is empty
pub struct NullNodeApi {
    endpoint: String,
    validators: Mutex<Result<ValidatorsResponse, PortError>>,
    counts: Mutex<HashMap<String, u64>>,
    count_override: Mutex<Option<Result<TransactionCountResponse, PortError>>>,
    send_queue: Mutex<VecDeque<Result<SendTransactionResponse, PortError>>>,
    send_delay: Mutex<Option<Duration>>,
    sent: Mutex<Vec<String>>,
    validators_calls: AtomicUsize,
    count_calls: AtomicUsize,
}

impl NullNodeApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            validators: Mutex::new(Ok(ValidatorsResponse::default())),
            counts: Mutex::new(HashMap::new()),
            count_override: Mutex::new(None),
            send_queue: Mutex::new(VecDeque::new()),
            send_delay: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
            validators_calls: AtomicUsize::new(0),
            count_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_validators(&self, response: ValidatorsResponse) {
        *self.validators.lock().unwrap() = Ok(response);
    }

    pub fn fail_validators(&self, err: PortError) {
        *self.validators.lock().unwrap() = Err(err);
    }

    pub fn set_transaction_count(&self, address: &str, count: u64) {
        let key = Address::parse(address)
            .map(|a| a.as_str().to_string())
            .unwrap_or_else(|_| address.to_string());
        self.counts.lock().unwrap().insert(key, count);
    }

    pub fn fail_transaction_count(&self, err: PortError) {
        *self.count_override.lock().unwrap() = Some(Err(err));
    }

    /// Answer transaction-count requests with a non-zero node code.
    pub fn reject_transaction_count(&self, code: i64, log: &str) {
        *self.count_override.lock().unwrap() = Some(Ok(TransactionCountResponse {
            code,
            result: TransactionCountResult::default(),
            log: log.to_string(),
        }));
    }

    pub fn queue_send_response(&self, response: Result<SendTransactionResponse, PortError>) {
        self.send_queue.lock().unwrap().push_back(response);
    }

    /// Hold every submission for `delay` before answering.
    pub fn set_send_delay(&self, delay: Duration) {
        *self.send_delay.lock().unwrap() = Some(delay);
    }

    /// Every transaction hex submitted, in arrival order.
    pub fn sent_transactions(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn validators_calls(&self) -> usize {
        self.validators_calls.load(Ordering::SeqCst)
    }

    pub fn transaction_count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NodeApi for NullNodeApi {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn validators(&self) -> Result<ValidatorsResponse, PortError> {
        self.validators_calls.fetch_add(1, Ordering::SeqCst);
        self.validators.lock().unwrap().clone()
    }

    async fn transaction_count(
        &self,
        address: &Address,
    ) -> Result<TransactionCountResponse, PortError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(programmed) = self.count_override.lock().unwrap().clone() {
            return programmed;
        }
        let count = self
            .counts
            .lock()
            .unwrap()
            .get(address.as_str())
            .copied()
            .unwrap_or(0);
        Ok(TransactionCountResponse {
            code: 0,
            result: TransactionCountResult { count },
            log: String::new(),
        })
    }

    async fn send_transaction(&self, tx_hex: &str) -> Result<SendTransactionResponse, PortError> {
        let delay = *self.send_delay.lock().unwrap();
        let seq = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(tx_hex.to_string());
            sent.len()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let queued = self.send_queue.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| {
            Ok(SendTransactionResponse {
                code: 0,
                result: SendTransactionResult {
                    hash: format!("Mt{seq:064x}"),
                },
                log: String::new(),
            })
        })
    }
}
