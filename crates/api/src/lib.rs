//! Inventory Service: HTTP API over the item table.

pub mod app;
pub mod config;
