//! Instrumented HTTP client for the Inventory Service.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

use stockroom_observability::{Context, KeyValue, SpanKind, Telemetry};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to inventory service failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("inventory service returned an undecodable body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Outcome of a call that reached the Inventory Service.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// `200 OK` with its decoded JSON body.
    Ok(Value),
    /// Any other status; the body is not read.
    Status(StatusCode),
}

/// Client for the Inventory Service.
///
/// Every call runs inside a client span parented on the caller's context and
/// carries that span's trace context in `traceparent`.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: String,
    telemetry: Arc<Telemetry>,
}

impl InventoryClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        telemetry: Arc<Telemetry>,
    ) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            telemetry,
        })
    }

    pub async fn add_item(
        &self,
        parent: &Context,
        name: &str,
        quantity: i64,
    ) -> Result<UpstreamReply, UpstreamError> {
        let body = json!({ "name": name, "quantity": quantity });
        self.call(parent, Method::POST, "/items/add", Some(body)).await
    }

    pub async fn list_items(&self, parent: &Context) -> Result<UpstreamReply, UpstreamError> {
        self.call(parent, Method::GET, "/items/all", None).await
    }

    async fn call(
        &self,
        parent: &Context,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<UpstreamReply, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        let span = self
            .telemetry
            .start_span(method.as_str().to_string(), SpanKind::Client, parent);
        span.set_attribute(KeyValue::new("http.request.method", method.as_str().to_string()));
        span.set_attribute(KeyValue::new("url.full", url.clone()));

        let mut headers = HeaderMap::new();
        self.telemetry.inject(span.context(), &mut headers);

        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                span.record_failure(&e);
                return Err(UpstreamError::Transport(e));
            }
        };

        let status = response.status();
        span.set_attribute(KeyValue::new(
            "http.response.status_code",
            i64::from(status.as_u16()),
        ));
        if status.is_client_error() || status.is_server_error() {
            span.set_error(status.to_string());
        }

        if status != StatusCode::OK {
            return Ok(UpstreamReply::Status(status));
        }

        match response.json::<Value>().await {
            Ok(value) => Ok(UpstreamReply::Ok(value)),
            Err(e) => {
                span.record_failure(&e);
                Err(UpstreamError::Decode(e))
            }
        }
    }
}
