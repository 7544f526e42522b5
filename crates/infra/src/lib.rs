//! Infrastructure: relational item storage and its connection settings.

pub mod config;
pub mod item_store;

pub use config::DatabaseConfig;
pub use item_store::{InMemoryItemStore, ItemStore, MySqlItemStore, StoreError};
