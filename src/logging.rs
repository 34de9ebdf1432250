//! Tracing subscriber setup for binaries and manual debugging.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `navsync=debug`.
pub const LOG_ENV: &str = "NAVSYNC_LOG";

/// Installs a fmt subscriber filtered by `$NAVSYNC_LOG` (default `info`).
/// Calling it again after a subscriber is installed does nothing.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
