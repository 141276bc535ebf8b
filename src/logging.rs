//! Tracing setup for the command line tool.
use tracing_subscriber::{EnvFilter, fmt};

/// Level used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a global subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// Standard output is reserved for command output. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
