//! Activation requests: build, sign and submit under a per-account lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::Instrument;
use vigil_types::{CoinSymbol, PublicKey, WatchedOperator};

use crate::builder::TransactionBuilder;
use crate::error::TxError;
use crate::submitter::TransactionSubmitter;

/// Result of an accepted switch transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationReceipt {
    pub hash: String,
    pub nonce: u64,
}

/// Turns activate/deactivate intents into submitted transactions.
///
/// Requests for the same paying account are serialized, so their nonces
/// are fetched and consumed in issuance order. Requests for different
/// accounts proceed concurrently.
pub struct ActivationService {
    builder: TransactionBuilder,
    submitter: TransactionSubmitter,
    gas_coin: CoinSymbol,
    account_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ActivationService {
    pub fn new(
        builder: TransactionBuilder,
        submitter: TransactionSubmitter,
        gas_coin: CoinSymbol,
    ) -> Self {
        Self {
            builder,
            submitter,
            gas_coin,
            account_locks: Mutex::new(HashMap::new()),
        }
    }

    fn locks(&self) -> MutexGuard<'_, HashMap<String, Arc<tokio::sync::Mutex<()>>>> {
        self.account_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_for(&self, payer: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.locks()
            .entry(payer.to_lowercase())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Forget `payer`'s lock once no other request holds or awaits it.
    fn release(&self, payer: &str, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.locks();
        // One reference lives in the map, the other is `lock`.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&payer.to_lowercase());
        }
    }

    #[cfg(test)]
    fn tracked_accounts(&self) -> usize {
        self.locks().len()
    }

    /// Switch `target` on (`activate`) or off, paid and signed by `payer`.
    pub async fn set_candidate_state(
        &self,
        payer: &str,
        signing_key: &str,
        target: &PublicKey,
        activate: bool,
    ) -> Result<ActivationReceipt, TxError> {
        let span = tracing::info_span!("activation", payer = %payer, pub_key = %target, activate);
        async move {
            let lock = self.lock_for(payer);
            let guard = lock.lock().await;

            let outcome = async {
                let signed = self
                    .builder
                    .build_activation_tx(payer, signing_key, target, activate, &self.gas_coin)
                    .await
                    .inspect_err(|e| tracing::warn!(error = %e, "could not build transaction"))?;

                match self.submitter.submit(&signed.hex).await {
                    Ok(hash) => {
                        tracing::info!(nonce = signed.nonce, hash = %hash, "transaction accepted");
                        Ok(ActivationReceipt {
                            hash,
                            nonce: signed.nonce,
                        })
                    }
                    Err(e) => {
                        tracing::warn!(nonce = signed.nonce, code = ?e.code(), error = %e, "transaction not accepted");
                        Err(e)
                    }
                }
            }
            .await;

            drop(guard);
            self.release(payer, lock);
            outcome
        }
        .instrument(span)
        .await
    }

    /// Switch the operator an owner watches, using the owner's stored credentials.
    pub async fn set_operator_state(
        &self,
        operator: &WatchedOperator,
        activate: bool,
    ) -> Result<ActivationReceipt, TxError> {
        let payer = operator
            .address
            .as_ref()
            .ok_or(TxError::MissingCredentials("no control address"))?;
        let key = operator
            .private_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(TxError::MissingCredentials("no private key"))?;
        self.set_candidate_state(payer.as_str(), key, &operator.pub_key, activate)
            .await
    }
}
