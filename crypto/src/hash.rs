//! Keccak-256 hashing for transactions and addresses.

use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 hash of arbitrary data.
///
/// This is the original Keccak padding, not the finalized SHA3-256.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
