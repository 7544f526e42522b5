//! User Interface Service: a traced pass-through to the Inventory Service.
//!
//! Handlers contain no tracing code. Inbound requests are wrapped in server
//! spans by [`middleware::trace_requests`]; outbound calls are wrapped in
//! client spans by [`upstream::InventoryClient`].

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod upstream;
