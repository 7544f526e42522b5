//! Inventory domain module.
//!
//! This crate contains the item model and its input rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod error;
pub mod item;

pub use error::{DomainError, DomainResult};
pub use item::{Item, ItemId, NewItem};
