//! Domain Layer
//!
//! Entities, pure stock and cart rules, repository traits.

pub mod entity;
pub mod repository;
pub mod services;

pub use repository::{DeleteOutcome, ItemRepository, ItemStore, StockTransaction};
