//! Single-signature data attached to a transaction.

use alloy_rlp::{Bytes, RlpEncodable};
use vigil_crypto::RecoverableSignature;

/// `v`, `r`, `s` as produced by the signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureData {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

#[derive(RlpEncodable)]
struct SignatureFields {
    v: u8,
    r: Bytes,
    s: Bytes,
}

impl SignatureData {
    /// RLP list `[v, r, s]` with `r` and `s` as minimal big-endian integers.
    pub fn encode(&self) -> Vec<u8> {
        alloy_rlp::encode(SignatureFields {
            v: self.v,
            r: Bytes::copy_from_slice(strip_leading_zeros(&self.r)),
            s: Bytes::copy_from_slice(strip_leading_zeros(&self.s)),
        })
    }

    pub fn recovery_id(&self) -> u8 {
        self.v.saturating_sub(27)
    }

    pub fn to_recoverable(&self) -> RecoverableSignature {
        RecoverableSignature {
            recovery_id: self.recovery_id(),
            r: self.r,
            s: self.s,
        }
    }
}

impl From<RecoverableSignature> for SignatureData {
    fn from(sig: RecoverableSignature) -> Self {
        Self {
            v: sig.v(),
            r: sig.r,
            s: sig.s,
        }
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}
