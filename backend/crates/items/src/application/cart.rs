//! Cart Use Case
//!
//! Adding and removing cart quantities. Both lock the rows they read.

use std::sync::Arc;

use kernel::id::{ItemId, ShopId, UserId};

use crate::domain::entity::cart::CartLine;
use crate::domain::repository::{ItemStore, StockTransaction};
use crate::domain::services::cart_rules::{quantity_after_add, quantity_after_remove};
use crate::error::{ItemError, ItemResult};

pub struct CartUseCase<S>
where
    S: ItemStore,
{
    store: Arc<S>,
}

fn require_positive(quantity: i32) -> ItemResult<()> {
    if quantity <= 0 {
        return Err(ItemError::Validation("quantity must be positive".to_string()));
    }
    Ok(())
}

impl<S> CartUseCase<S>
where
    S: ItemStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the new cart quantity for the item.
    pub async fn add(
        &self,
        shop_id: ShopId,
        user_id: UserId,
        item_id: ItemId,
        quantity: i32,
    ) -> ItemResult<i32> {
        require_positive(quantity)?;

        let mut tx = self.store.begin().await?;

        let stock = tx
            .lock_stock_line(&item_id, &shop_id)
            .await?
            .ok_or(ItemError::StockLineNotFound)?;

        let in_cart = tx
            .cart_line(&shop_id, &user_id, &item_id)
            .await?
            .map_or(0, |line| line.quantity);

        let new_quantity = quantity_after_add(in_cart, quantity, stock.quantity)?;

        tx.save_cart_line(&CartLine {
            shop_id,
            user_id,
            item_id,
            quantity: new_quantity,
        })
        .await?;

        tx.commit().await?;

        tracing::debug!(
            item_id = %item_id,
            shop_id = %shop_id,
            user_id = %user_id,
            quantity = new_quantity,
            "Cart line updated"
        );

        Ok(new_quantity)
    }

    /// Returns the remaining cart quantity; `None` when the line was removed.
    pub async fn remove(
        &self,
        shop_id: ShopId,
        user_id: UserId,
        item_id: ItemId,
        quantity: i32,
    ) -> ItemResult<Option<i32>> {
        require_positive(quantity)?;

        let mut tx = self.store.begin().await?;

        let mut line = tx
            .cart_line(&shop_id, &user_id, &item_id)
            .await?
            .ok_or(ItemError::CartLineNotFound)?;

        let remaining = quantity_after_remove(line.quantity, quantity)?;
        match remaining {
            Some(left) => {
                line.quantity = left;
                tx.save_cart_line(&line).await?;
            }
            None => tx.delete_cart_line(&shop_id, &user_id, &item_id).await?,
        }

        tx.commit().await?;

        Ok(remaining)
    }
}
