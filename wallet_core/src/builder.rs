//! Candidate switch transaction building and signing.

use std::sync::Arc;

use vigil_crypto::derive_address;
use vigil_ports::NodeApi;
use vigil_transactions::{CandidateSwitch, Transaction};
use vigil_types::{Address, ChainId, CoinSymbol, PrivateKey, PublicKey};

use crate::error::TxError;

/// A signed transaction ready for submission.
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub payer: Address,
    pub nonce: u64,
    /// Lowercase hex of the wire bytes.
    pub hex: String,
}

/// Builds signed switch transactions for one chain.
///
/// Holds no key material; the secret is parsed, used and dropped (zeroized)
/// inside [`TransactionBuilder::build_activation_tx`].
#[derive(Clone)]
pub struct TransactionBuilder {
    api: Arc<dyn NodeApi>,
    chain_id: ChainId,
    gas_price: u32,
}

impl TransactionBuilder {
    pub fn new(api: Arc<dyn NodeApi>, chain_id: ChainId, gas_price: u32) -> Self {
        Self {
            api,
            chain_id,
            gas_price,
        }
    }

    /// Next nonce for `payer`: the node's transaction count plus one.
    pub async fn next_nonce(&self, payer: &Address) -> Result<u64, TxError> {
        let resp = self
            .api
            .transaction_count(payer)
            .await
            .map_err(|e| TxError::NonceUnavailable(e.to_string()))?;
        if resp.code != 0 {
            return Err(TxError::NonceUnavailable(format!(
                "code {}: {}",
                resp.code, resp.log
            )));
        }
        resp.result
            .count
            .checked_add(1)
            .ok_or_else(|| TxError::NonceUnavailable("transaction count overflow".into()))
    }

    /// Build and sign a set-candidate-online (`activate`) or
    /// set-candidate-offline transaction paid by `payer`.
    ///
    /// Inputs are validated before the node is asked for a nonce, so a
    /// malformed request never costs a network round trip.
    pub async fn build_activation_tx(
        &self,
        payer: &str,
        signing_key: &str,
        target: &PublicKey,
        activate: bool,
        gas_coin: &CoinSymbol,
    ) -> Result<SignedTransaction, TxError> {
        let payer = Address::parse(payer).map_err(|e| TxError::MalformedAddress(e.to_string()))?;
        let switch = CandidateSwitch::new(target, activate)
            .map_err(|e| TxError::MalformedKey(e.to_string()))?;

        let key =
            PrivateKey::from_hex(signing_key).map_err(|e| TxError::SigningFailed(e.to_string()))?;
        let derived = derive_address(&key).map_err(|e| TxError::SigningFailed(e.to_string()))?;
        if derived != payer {
            return Err(TxError::KeyMismatch {
                expected: payer,
                derived,
            });
        }

        let nonce = self.next_nonce(&payer).await?;
        let mut transaction =
            Transaction::candidate_switch(nonce, self.chain_id, self.gas_price, *gas_coin, switch);
        transaction
            .sign(&key)
            .map_err(|e| TxError::SigningFailed(e.to_string()))?;
        let hex = transaction
            .to_hex()
            .map_err(|e| TxError::SigningFailed(e.to_string()))?;

        tracing::debug!(payer = %payer, nonce, activate, "built candidate switch transaction");
        Ok(SignedTransaction {
            transaction,
            payer,
            nonce,
            hex,
        })
    }
}
