//! Tracing subscriber setup.

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter; overrides the configured level.
pub const LOG_ENV: &str = "FIELDQUILL_LOG";

/// Installs a stderr formatter filtered by `FIELDQUILL_LOG`, or by
/// `default_directive` when the variable is unset or invalid.
///
/// Calling it twice is harmless: the second install is skipped.
pub fn setup_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
