use std::sync::Arc;

use axum::{
    extract::{MatchedPath, State},
    middleware::Next,
    response::Response,
};

use stockroom_observability::{KeyValue, SpanKind, Telemetry};

use crate::context::RequestTrace;

/// Wrap every inbound request in a server span.
///
/// The span continues any trace carried by the request headers, records the
/// method, path and response status, and is marked failed on 5xx responses.
/// It is named after the matched route template; unrouted requests get the
/// bare method so arbitrary paths never become span names.
pub async fn trace_requests(
    State(telemetry): State<Arc<Telemetry>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let parent = telemetry.extract(req.headers());
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    let name = match req.extensions().get::<MatchedPath>() {
        Some(route) => {
            let route = route.as_str();
            format!("{method} {route}")
        }
        None => method.clone(),
    };

    let span = telemetry.start_span(name, SpanKind::Server, &parent);
    span.set_attribute(KeyValue::new("http.request.method", method));
    span.set_attribute(KeyValue::new("url.path", path));

    req.extensions_mut()
        .insert(RequestTrace::new(span.context().clone()));

    let response = next.run(req).await;

    let status = response.status();
    span.set_attribute(KeyValue::new(
        "http.response.status_code",
        i64::from(status.as_u16()),
    ));
    if status.is_server_error() {
        span.set_error(status.to_string());
    }

    response
}
