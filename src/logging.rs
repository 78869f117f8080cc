//! Logging configuration using tracing
//!
//! Provides structured logging to stderr with support for the RUST_LOG environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither RUST_LOG nor the config file sets one
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the tracing subscriber with the default "warn" filter
///
/// # Errors
/// Returns an error if the subscriber has already been initialized
pub fn init() -> crate::Result<()> {
    init_with_default(DEFAULT_FILTER)
}

/// Initialize the tracing subscriber
///
/// Sets up structured logging with:
/// - Filtering via RUST_LOG, falling back to `default_filter`
/// - Formatted output to stderr, keeping stdout free for rendered mail
///
/// # Example RUST_LOG values
/// - `RUST_LOG=info` - Show gate decisions
/// - `RUST_LOG=mailgate=debug` - Debug level for this crate only
///
/// # Errors
/// Returns an error if the subscriber has already been initialized
pub fn init_with_default(default_filter: &str) -> crate::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .pretty(),
        )
        .try_init()
        .map_err(|e| {
            crate::MailGateError::Other(format!("Failed to initialize tracing: {}", e))
        })?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init();
}
