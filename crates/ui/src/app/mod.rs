//! HTTP application wiring (Axum router + tracing layer).

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use stockroom_observability::Telemetry;

use crate::middleware;
use crate::upstream::InventoryClient;

pub mod dto;
pub mod errors;
pub mod routes;

/// Handles shared by every request.
#[derive(Debug, Clone)]
pub struct UiServices {
    inventory: InventoryClient,
}

impl UiServices {
    pub fn new(inventory: InventoryClient) -> Self {
        Self { inventory }
    }

    pub fn inventory(&self) -> &InventoryClient {
        &self.inventory
    }
}

/// Build the full HTTP router with inbound request tracing applied.
pub fn build_app(services: UiServices, telemetry: Arc<Telemetry>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                telemetry,
                middleware::trace_requests,
            ))
            .layer(Extension(Arc::new(services))),
    )
}
