//! Process-scoped tracing context.
//!
//! A service builds one [`Telemetry`] in `main` and shares it with handlers
//! through an `Arc`. Nothing is registered globally: the tracer provider and
//! the propagator travel with the handle, so tests can run several services
//! side by side in one process, each exporting to its own sink.

use std::borrow::Cow;
use std::path::PathBuf;

use http::HeaderMap;
use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::trace::{SpanKind, TraceContextExt, Tracer, TracerProvider as _};
use opentelemetry::Context;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::error::OTelSdkError;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use thiserror::Error;

use crate::propagation::{HeaderExtractor, HeaderInjector};
use crate::resource::{self, ServiceIdentity};
use crate::span::SpanScope;

pub const DEFAULT_OTLP_TRACES_ENDPOINT: &str = "http://collector:4318/v1/traces";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build span exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to shut down tracer provider: {0}")]
    Shutdown(#[from] OTelSdkError),
}

/// Exporter and resource settings for one service.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub identity: ServiceIdentity,
    pub otlp_endpoint: String,
    pub metadata_files: Vec<PathBuf>,
}

impl TelemetryConfig {
    pub fn new(identity: ServiceIdentity) -> Self {
        Self {
            identity,
            otlp_endpoint: DEFAULT_OTLP_TRACES_ENDPOINT.to_string(),
            metadata_files: resource::default_metadata_files(),
        }
    }

    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup("OTEL_EXPORTER_OTLP_TRACES_ENDPOINT").filter(|v| !v.is_empty()) {
            self.otlp_endpoint = endpoint;
        }
        self
    }
}

/// Tracer, provider and propagator for one service.
#[derive(Debug, Clone)]
pub struct Telemetry {
    provider: SdkTracerProvider,
    tracer: SdkTracer,
    propagator: TraceContextPropagator,
}

impl Telemetry {
    /// Build the OTLP/HTTP exporter and a batching tracer provider.
    ///
    /// Spans are exported asynchronously from the batch processor's worker;
    /// request handlers never wait on the collector.
    pub fn install(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_endpoint(config.otlp_endpoint.clone())
            .build()?;

        let provider = SdkTracerProvider::builder()
            .with_resource(resource::build_resource(&config.identity, &config.metadata_files))
            .with_batch_exporter(exporter)
            .build();

        tracing::info!(
            service = %config.identity.name,
            version = %config.identity.version,
            endpoint = %config.otlp_endpoint,
            "span export configured"
        );

        Ok(Self::from_provider(provider, config.identity.name.clone()))
    }

    /// Wrap an already configured provider.
    pub fn from_provider(provider: SdkTracerProvider, scope: impl Into<Cow<'static, str>>) -> Self {
        let tracer = provider.tracer(scope);
        Self {
            provider,
            tracer,
            propagator: TraceContextPropagator::new(),
        }
    }

    /// Parent context carried by inbound request headers (empty if none).
    pub fn extract(&self, headers: &HeaderMap) -> Context {
        self.propagator.extract(&HeaderExtractor(headers))
    }

    /// Write `cx` into outbound request headers.
    pub fn inject(&self, cx: &Context, headers: &mut HeaderMap) {
        self.propagator.inject_context(cx, &mut HeaderInjector(headers));
    }

    pub fn start_span(
        &self,
        name: impl Into<Cow<'static, str>>,
        kind: SpanKind,
        parent: &Context,
    ) -> SpanScope {
        let span = self
            .tracer
            .span_builder(name)
            .with_kind(kind)
            .start_with_context(&self.tracer, parent);
        SpanScope::new(parent.with_span(span))
    }

    /// Flush pending spans and stop the exporter.
    pub fn shutdown(&self) -> Result<(), TelemetryError> {
        self.provider.shutdown()?;
        Ok(())
    }
}
