//! MySQL-backed item store.
//!
//! Backs onto a single table:
//!
//! ```sql
//! CREATE TABLE items (
//!     id       INT AUTO_INCREMENT PRIMARY KEY,
//!     name     VARCHAR(255) NOT NULL,
//!     quantity INT NOT NULL
//! );
//! ```
//!
//! Connections come from a lazily-initialised SQLx pool. Every operation
//! checks a connection out for the duration of the call only; the pool guard
//! returns it on every exit path, including query failures.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use tracing::instrument;

use stockroom_inventory::{Item, ItemId, NewItem};

use super::{sql, ItemStore, StoreError};
use crate::config::DatabaseConfig;

#[derive(Debug, Clone)]
pub struct MySqlItemStore {
    pool: MySqlPool,
}

impl MySqlItemStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Build a store without touching the network; the first request opens
    /// the first connection.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(config.connect_options());
        Self::new(pool)
    }

    /// Wait for checked-out connections to return, then close them all.
    /// Later calls fail with [`StoreError::Database`].
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ItemStore for MySqlItemStore {
    #[instrument(skip_all, err)]
    async fn insert(&self, item: &NewItem) -> Result<Item, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(sql::INSERT_ITEM)
            .bind(item.name())
            .bind(item.quantity())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| StoreError::Unavailable("insert id out of range".to_string()))?;

        Ok(item.clone().into_item(ItemId::new(id)))
    }

    #[instrument(skip_all, err)]
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query(sql::SELECT_ITEMS)
            .fetch_all(&self.pool)
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(Item {
                id: ItemId::new(row.try_get::<i64, _>("id")?),
                name: row.try_get("name")?,
                quantity: row.try_get::<i64, _>("quantity")?,
            });
        }

        Ok(items)
    }
}
