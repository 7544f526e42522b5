//! Scoped span lifetime.

use std::borrow::Cow;
use std::error::Error;

use opentelemetry::trace::{SpanKind, Status, TraceContextExt, TraceId};
use opentelemetry::{Context, KeyValue};

use crate::telemetry::Telemetry;

/// A started span that ends when the scope is dropped.
///
/// The scope owns the [`Context`] carrying the span. Dropping it ends the span
/// exactly once, on every exit path (early return, `?`, panic unwind). Clones
/// of [`SpanScope::context`] handed to callees stay valid as parents but do
/// not keep the span open.
#[derive(Debug)]
pub struct SpanScope {
    cx: Context,
}

impl SpanScope {
    pub(crate) fn new(cx: Context) -> Self {
        Self { cx }
    }

    /// The context to parent child spans on or to inject into outbound calls.
    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn trace_id(&self) -> TraceId {
        self.cx.span().span_context().trace_id()
    }

    pub fn set_attribute(&self, attribute: KeyValue) {
        self.cx.span().set_attribute(attribute);
    }

    pub fn add_event(&self, name: impl Into<Cow<'static, str>>) {
        self.cx.span().add_event(name, Vec::new());
    }

    pub fn set_error(&self, description: impl Into<Cow<'static, str>>) {
        self.cx.span().set_status(Status::error(description));
    }

    /// Mark the span failed and attach `err` as an exception event.
    pub fn record_failure(&self, err: &dyn Error) {
        let span = self.cx.span();
        span.set_status(Status::error(err.to_string()));
        span.record_error(err);
    }

    /// Start a nested span parented on this one.
    pub fn child(
        &self,
        telemetry: &Telemetry,
        name: impl Into<Cow<'static, str>>,
        kind: SpanKind,
    ) -> SpanScope {
        telemetry.start_span(name, kind, &self.cx)
    }
}

impl Drop for SpanScope {
    fn drop(&mut self) {
        self.cx.span().end();
    }
}
