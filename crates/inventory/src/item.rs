use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Store-assigned item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A persisted inventory row.
///
/// Items are created once and never updated; the store is the only system of
/// record, so this is a plain snapshot of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
}

/// Validated input for inserting a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    name: String,
    quantity: i64,
}

impl NewItem {
    /// Build a new item from loosely-typed request fields.
    ///
    /// `name` must be present and non-empty and `quantity` must be present.
    /// Quantity has no range check: zero and negative values are accepted.
    pub fn new(name: Option<String>, quantity: Option<i64>) -> DomainResult<Self> {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => return Err(DomainError::validation("name must be non-empty")),
        };
        let quantity = quantity.ok_or_else(|| DomainError::validation("quantity is required"))?;

        Ok(Self { name, quantity })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Attach the identifier assigned by the store.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            quantity: self.quantity,
        }
    }
}
