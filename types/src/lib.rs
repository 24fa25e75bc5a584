//! Fundamental types for the vigil candidate monitor.
//!
//! This crate defines the data shared across every other crate in the workspace:
//! candidate keys, account addresses, coin symbols, fixed-point amounts,
//! candidates and their stakes, chain identifiers, timestamps, and the
//! watched-operator record handed over by the user directory.

pub mod address;
pub mod amount;
pub mod candidate;
pub mod coin;
pub mod error;
pub mod keys;
pub mod network;
pub mod operator;
pub mod time;

pub use address::Address;
pub use amount::{to_display_amount, TokenAmount};
pub use candidate::{Candidate, CandidateStatus, Stake, StatusOf};
pub use coin::CoinSymbol;
pub use error::VigilError;
pub use keys::{PrivateKey, PublicKey};
pub use network::ChainId;
pub use operator::{OwnerId, WatchedOperator};
pub use time::{Clock, SystemClock, Timestamp};
