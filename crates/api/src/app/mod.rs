//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: handles shared by every request (store, telemetry)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::InventoryServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: InventoryServices) -> Router {
    routes::router().layer(ServiceBuilder::new().layer(Extension(Arc::new(services))))
}
