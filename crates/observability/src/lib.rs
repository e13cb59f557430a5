//! Tracing/logging setup shared by the API binary and integration tests.

/// Initialize process-wide tracing with the default `info` filter.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

pub mod tracing;
