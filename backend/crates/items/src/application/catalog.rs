//! Catalog Use Case
//!
//! Create, list and delete catalog items.

use std::sync::Arc;

use kernel::id::ItemId;

use crate::domain::entity::item::{Item, ItemSummary};
use crate::domain::repository::{DeleteOutcome, ItemRepository};
use crate::error::{ItemError, ItemResult};

pub struct CatalogUseCase<R>
where
    R: ItemRepository,
{
    repo: Arc<R>,
}

impl<R> CatalogUseCase<R>
where
    R: ItemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, name: String) -> ItemResult<ItemId> {
        let item = Item::new(name)?;

        self.repo.create_item(&item).await?;

        tracing::info!(item_id = %item.item_id, name = %item.name, "Item created");

        Ok(item.item_id)
    }

    pub async fn list(&self) -> ItemResult<Vec<ItemSummary>> {
        self.repo.list_items().await
    }

    /// Fails with `HasDependents` while any stock, queue, cart or sale row
    /// references the item.
    pub async fn delete(&self, item_id: ItemId) -> ItemResult<()> {
        match self.repo.delete_item(&item_id).await? {
            DeleteOutcome::Deleted => {
                tracing::info!(item_id = %item_id, "Item deleted");
                Ok(())
            }
            DeleteOutcome::NotFound => Err(ItemError::ItemNotFound),
            DeleteOutcome::HasDependents => Err(ItemError::HasDependents),
        }
    }
}
