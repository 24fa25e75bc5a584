//! Candidate switch pipeline.
//!
//! Provides everything needed to turn an activate/deactivate intent into a
//! transaction the node accepted:
//! - [`NodeClient`]: HTTP access to the node API
//! - [`TransactionBuilder`]: nonce lookup, payload, RLP, secp256k1 signature
//! - [`TransactionSubmitter`]: submission and response interpretation
//! - [`ActivationService`]: the above, serialized per paying account

pub mod activation;
pub mod builder;
pub mod client;
pub mod error;
pub mod submitter;

pub use activation::{ActivationReceipt, ActivationService};
pub use builder::{SignedTransaction, TransactionBuilder};
pub use client::NodeClient;
pub use error::TxError;
pub use submitter::{TransactionSubmitter, MALFORMED_RESPONSE_CODE};
