//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    // Our crates at info, everything else at warn; overridable via RUST_LOG.
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,oficina_api=info,oficina_auth=info,oficina_store=info"))
}

/// Initialize JSON logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Human-readable variant for local runs and tests.
pub fn init_compact() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .compact()
        .try_init();
}
