//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the JSON subscriber, filtered by `RUST_LOG` (falls back to `info`).
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

/// Like [`init`], but with a caller-chosen fallback filter (e.g. `"lodgex=debug"` in tests).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_with_default(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
