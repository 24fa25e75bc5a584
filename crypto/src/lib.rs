//! Cryptographic primitives for the vigil candidate monitor.
//!
//! - **secp256k1** recoverable ECDSA for signing transactions
//! - **Keccak-256** for transaction hashes and address derivation
//! - Address derivation with `Mx` prefix

pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use error::CryptoError;
pub use hash::keccak256;
pub use keys::{derive_address, public_from_private, secret_key};
pub use sign::{recover_public, sign_recoverable, RecoverableSignature};
