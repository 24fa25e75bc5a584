//! Minimal tracing setup for one-shot commands.

/// Initialize a plain stderr subscriber.
///
/// Respects `RUST_LOG`; falls back to `default_level` when it is unset.
pub fn init_tracing(default_level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
