// ABOUTME: Tracing subscriber setup for the binary
// ABOUTME: Honors RUST_LOG, falling back to the default filter

use taskbot_config::constants::{DEFAULT_LOG_FILTER, RUST_LOG};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(RUST_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .compact()
        .init();
}
