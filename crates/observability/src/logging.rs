//! Log subscriber initialization.
//!
//! Events are written as flattened JSON lines. The filter comes from `RUST_LOG`;
//! when unset, the calling service logs at `info` and its dependencies at `warn`.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a service crate (e.g. `stockroom_api`).
pub fn default_directive(crate_name: &str) -> String {
    format!("warn,{}=info,stockroom_observability=info", crate_name.replace('-', "_"))
}

/// Initialize logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(crate_name: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(crate_name)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_target(false)
        .try_init();
}
