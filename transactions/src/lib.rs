//! Candidate switch transactions and their wire encoding.
//!
//! Transaction types:
//! - **SetCandidateOnline** (`0x0A`): put a candidate back into the
//!   validator election
//! - **SetCandidateOffline** (`0x0B`): take a candidate out of it
//!
//! A transaction is built unsigned, signed once with the control account's
//! secp256k1 key, and rendered as lowercase hex for submission.

pub mod candidate_switch;
pub mod encoding;
pub mod error;
pub mod signature;

pub use candidate_switch::CandidateSwitch;
pub use error::TransactionError;
pub use signature::SignatureData;

use serde::{Deserialize, Serialize};
use vigil_crypto::{keccak256, recover_public, sign_recoverable};
use vigil_types::{Address, ChainId, CoinSymbol, PrivateKey};

/// Transaction type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxType {
    SetCandidateOnline = 0x0A,
    SetCandidateOffline = 0x0B,
}

/// How the transaction is authorized. Only single-key signatures are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureType {
    Single = 0x01,
}

/// A candidate switch transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub nonce: u64,
    pub chain_id: ChainId,
    pub gas_price: u32,
    pub gas_coin: CoinSymbol,
    pub data: CandidateSwitch,
    pub payload: Vec<u8>,
    pub service_data: Vec<u8>,
    pub signature_type: SignatureType,
    pub signature: Option<SignatureData>,
}

impl Transaction {
    /// An unsigned switch transaction with empty payload and service data.
    pub fn candidate_switch(
        nonce: u64,
        chain_id: ChainId,
        gas_price: u32,
        gas_coin: CoinSymbol,
        data: CandidateSwitch,
    ) -> Self {
        Self {
            nonce,
            chain_id,
            gas_price,
            gas_coin,
            data,
            payload: Vec::new(),
            service_data: Vec::new(),
            signature_type: SignatureType::Single,
            signature: None,
        }
    }

    pub fn tx_type(&self) -> TxType {
        self.data.tx_type()
    }

    /// RLP pre-image covered by the signature.
    pub fn signing_payload(&self) -> Vec<u8> {
        encoding::signing_payload(self)
    }

    /// Keccak-256 of the pre-image.
    pub fn signing_hash(&self) -> [u8; 32] {
        keccak256(&self.signing_payload())
    }

    /// Sign in place, replacing any previous signature.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<(), TransactionError> {
        let sig = sign_recoverable(&self.signing_hash(), key)?;
        self.signature = Some(sig.into());
        Ok(())
    }

    /// The account whose key produced the signature.
    pub fn signer(&self) -> Result<Address, TransactionError> {
        let sig = self.signature.ok_or(TransactionError::Unsigned)?;
        Ok(recover_public(&self.signing_hash(), &sig.to_recoverable())?)
    }

    /// Wire bytes. Fails if the transaction has not been signed.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        let sig = self.signature.ok_or(TransactionError::Unsigned)?;
        Ok(encoding::wire_encoding(self, sig.encode()))
    }

    /// Lowercase hex of the wire bytes, as the node API expects.
    pub fn to_hex(&self) -> Result<String, TransactionError> {
        self.encode().map(hex::encode)
    }
}
