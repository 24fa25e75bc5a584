//! Seams between the monitor core and the outside world.
//!
//! - [`NodeApi`]: the three node endpoints the core consumes
//! - [`UserDirectory`]: source of watched operators
//! - [`Notifier`]: outbound alert delivery
//!
//! Real implementations live in `vigil-wallet-core` (HTTP) and `vigil-node`
//! (log-backed collaborators); deterministic ones in `vigil-nullables`.

pub mod api;
pub mod directory;
pub mod error;
pub mod notifier;

pub use api::{
    CandidateEntry, NodeApi, SendTransactionResponse, SendTransactionResult, StakeEntry,
    TransactionCountResponse, TransactionCountResult, ValidatorEntry, ValidatorsResponse,
};
pub use directory::UserDirectory;
pub use error::PortError;
pub use notifier::Notifier;
