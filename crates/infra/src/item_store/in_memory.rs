use std::sync::RwLock;

use async_trait::async_trait;
use stockroom_inventory::{Item, ItemId, NewItem};

use super::{ItemStore, StoreError};

/// In-memory item table for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Item>,
    last_id: i64,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn insert(&self, item: &NewItem) -> Result<Item, StoreError> {
        let mut table = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("item table lock poisoned".to_string()))?;

        table.last_id += 1;
        let row = item.clone().into_item(ItemId::new(table.last_id));
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let table = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("item table lock poisoned".to_string()))?;
        Ok(table.rows.clone())
    }
}
