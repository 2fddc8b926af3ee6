//! Catalog Item

use chrono::{DateTime, Utc};
use kernel::id::ItemId;

use crate::error::{ItemError, ItemResult};

const NAME_MAX_LENGTH: usize = 50;

/// Shop-independent catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub item_id: ItemId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(name: String) -> ItemResult<Self> {
        let name = name.trim().to_string();

        if name.is_empty() {
            return Err(ItemError::Validation("name cannot be empty".to_string()));
        }
        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(ItemError::Validation(format!(
                "name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }

        Ok(Self {
            item_id: ItemId::new(),
            name,
            created_at: Utc::now(),
        })
    }
}

/// Catalog entry with its quantity summed over every shop, active and queued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: i64,
}
