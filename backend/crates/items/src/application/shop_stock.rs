//! Shop Stock Use Case

use std::sync::Arc;

use kernel::id::{ItemId, ShopId};

use crate::domain::entity::stock::ShopStockEntry;
use crate::domain::repository::{DeleteOutcome, ItemRepository};
use crate::error::{ItemError, ItemResult};

pub struct ShopStockUseCase<R>
where
    R: ItemRepository,
{
    repo: Arc<R>,
}

impl<R> ShopStockUseCase<R>
where
    R: ItemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, shop_id: ShopId) -> ItemResult<Vec<ShopStockEntry>> {
        self.repo.shop_stock(&shop_id).await
    }

    /// Remove the active line. Queued shipments or cart lines block removal.
    pub async fn delete(&self, shop_id: ShopId, item_id: ItemId) -> ItemResult<()> {
        match self.repo.delete_stock_line(&item_id, &shop_id).await? {
            DeleteOutcome::Deleted => {
                tracing::info!(item_id = %item_id, shop_id = %shop_id, "Stock line deleted");
                Ok(())
            }
            DeleteOutcome::NotFound => Err(ItemError::StockLineNotFound),
            DeleteOutcome::HasDependents => Err(ItemError::HasDependents),
        }
    }
}
