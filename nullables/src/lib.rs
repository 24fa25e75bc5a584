//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (clock, node API, user directory, notifier)
//! are abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic, programmable values
//! - Record what was sent to them for assertions
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod directory;
pub mod node_api;
pub mod notifier;

pub use clock::NullClock;
pub use directory::NullDirectory;
pub use node_api::NullNodeApi;
pub use notifier::NullNotifier;
