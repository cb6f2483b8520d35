//! Logging Infrastructure
//!
//! Structured logging setup shared by binaries and integration harnesses.

use tracing_subscriber::EnvFilter;

/// Initialize the logger with the default `info` level.
pub fn init_logger() {
    init_logger_with_level(None);
}

/// Initialize the logger, honoring `RUST_LOG` when set.
pub fn init_logger_with_level(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));

    // A second init (tests) is fine to ignore.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
