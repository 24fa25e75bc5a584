//! Recoverable secp256k1 ECDSA signing.

use secp256k1::ecdsa::{RecoverableSignature as EcRecoverable, RecoveryId};
use secp256k1::{Message, SECP256K1};
use vigil_types::{Address, PrivateKey};

use crate::error::CryptoError;
use crate::keys::{address_from_public, secret_key};

/// A signature with the recovery id needed to rebuild the signer's key.
///
/// `r` and `s` are fixed-width big-endian scalars; `s` is always in the
/// lower half of the curve order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub recovery_id: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl RecoverableSignature {
    /// The Ethereum-style `v` value: recovery id plus 27.
    pub fn v(&self) -> u8 {
        self.recovery_id + 27
    }

    fn to_ec(self) -> Result<EcRecoverable, CryptoError> {
        let id = RecoveryId::from_i32(i32::from(self.recovery_id))
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&self.r);
        compact[32..].copy_from_slice(&self.s);
        EcRecoverable::from_compact(&compact, id)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))
    }
}

/// Sign a 32-byte digest. Deterministic (RFC 6979 nonces).
pub fn sign_recoverable(
    digest: &[u8; 32],
    private_key: &PrivateKey,
) -> Result<RecoverableSignature, CryptoError> {
    let sk = secret_key(private_key)?;
    let msg = Message::from_digest_slice(digest)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let (id, compact) = SECP256K1
        .sign_ecdsa_recoverable(&msg, &sk)
        .serialize_compact();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&compact[..32]);
    s.copy_from_slice(&compact[32..]);
    Ok(RecoverableSignature {
        recovery_id: id.to_i32() as u8,
        r,
        s,
    })
}

/// Recover the address that produced `signature` over `digest`.
pub fn recover_public(
    digest: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<Address, CryptoError> {
    let msg = Message::from_digest_slice(digest)
        .map_err(|e| CryptoError::Recovery(e.to_string()))?;
    let public = SECP256K1
        .recover_ecdsa(&msg, &signature.to_ec()?)
        .map_err(|e| CryptoError::Recovery(e.to_string()))?;
    Ok(address_from_public(&public.serialize_uncompressed()))
}
