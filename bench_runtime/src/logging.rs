//! Tracing setup shared by the binaries.
//!
//! Logs go to stderr; stdout belongs to the benchmark program.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global subscriber. `RUST_LOG` wins over `level`.
/// Calling twice is harmless; the first subscriber stays.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
