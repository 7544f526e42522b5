use stockroom_observability::Context;

/// Trace context of the inbound request's server span.
///
/// Inserted by the tracing middleware; handlers pass it to outbound calls so
/// client spans nest under the request.
#[derive(Debug, Clone)]
pub struct RequestTrace {
    cx: Context,
}

impl RequestTrace {
    pub fn new(cx: Context) -> Self {
        Self { cx }
    }

    pub fn context(&self) -> &Context {
        &self.cx
    }
}
