//! Set-candidate-online / set-candidate-offline payload.

use alloy_rlp::RlpEncodable;
use vigil_types::PublicKey;

use crate::error::TransactionError;
use crate::TxType;

/// Turns a candidate on or off. Only the candidate's control account may
/// send it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateSwitch {
    pub pub_key: [u8; 32],
    pub activate: bool,
}

#[derive(RlpEncodable)]
struct SwitchData {
    pub_key: [u8; 32],
}

impl CandidateSwitch {
    /// Decode the textual `Mp` key into the raw 32 bytes carried on the wire.
    pub fn new(target: &PublicKey, activate: bool) -> Result<Self, TransactionError> {
        let pub_key = target
            .to_bytes()
            .map_err(|e| TransactionError::MalformedKey(e.to_string()))?;
        Ok(Self { pub_key, activate })
    }

    pub fn tx_type(&self) -> TxType {
        if self.activate {
            TxType::SetCandidateOnline
        } else {
            TxType::SetCandidateOffline
        }
    }

    /// RLP form placed in the transaction's data field: a one-item list.
    pub fn encode(&self) -> Vec<u8> {
        alloy_rlp::encode(SwitchData {
            pub_key: self.pub_key,
        })
    }
}
