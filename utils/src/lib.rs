//! Shared utilities for the vigil candidate monitor.

pub mod format;
pub mod logging;

pub use format::{format_coins, format_duration, shorten};
pub use logging::init_tracing;
