//! Logging and distributed tracing shared by both services.
//!
//! Logs go through `tracing` with a JSON subscriber. Spans go through the
//! OpenTelemetry SDK via an explicit [`Telemetry`] handle that each service
//! builds once at startup and hands to its handlers.

/// Initialize process-wide logging for the named service crate.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(crate_name: &str) {
    logging::init(crate_name);
}

/// Log subscriber configuration (filters, layers).
pub mod logging;

pub mod propagation;
pub mod resource;
pub mod span;
pub mod telemetry;

pub use resource::{METADATA_FILES, ServiceIdentity};
pub use span::SpanScope;
pub use telemetry::{Telemetry, TelemetryConfig, TelemetryError};

pub use opentelemetry::{Context, KeyValue, trace::SpanKind};
