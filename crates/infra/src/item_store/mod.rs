//! Item storage abstraction.

use std::sync::Arc;

use async_trait::async_trait;
use stockroom_inventory::{Item, NewItem};
use thiserror::Error;

pub mod in_memory;
pub mod mysql;

pub use in_memory::InMemoryItemStore;
pub use mysql::MySqlItemStore;

/// Statement text executed by the relational store.
///
/// These are also the values reported on tracing spans: the statement shape
/// only, never the bound values.
pub mod sql {
    pub const INSERT_ITEM: &str = "INSERT INTO items (name, quantity) VALUES (?, ?)";
    pub const SELECT_ITEMS: &str = "SELECT id, name, quantity FROM items";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// System of record for inventory items.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert one row and commit it. Duplicate inputs create duplicate rows.
    async fn insert(&self, item: &NewItem) -> Result<Item, StoreError>;

    /// All rows, in whatever order the store returns them.
    async fn list(&self) -> Result<Vec<Item>, StoreError>;
}

#[async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn insert(&self, item: &NewItem) -> Result<Item, StoreError> {
        (**self).insert(item).await
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        (**self).list().await
    }
}
