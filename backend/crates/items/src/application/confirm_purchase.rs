//! Confirm Purchase Use Case
//!
//! Turns the caller's cart into sales. For each cart line the active stock is
//! decremented and a sale is recorded; a line that reaches exactly zero is
//! refilled from the oldest queued shipment. The cart is emptied at the end.
//! Any failure leaves every row untouched.

use std::sync::Arc;

use kernel::id::{ShopId, UserId};

use crate::domain::entity::sale::Sale;
use crate::domain::repository::{ItemStore, StockTransaction};
use crate::error::{ItemError, ItemResult};

#[derive(Debug)]
pub struct PurchaseReceipt {
    pub sales: Vec<Sale>,
    /// Queue entries promoted to active stock
    pub promoted: Vec<i64>,
}

impl PurchaseReceipt {
    pub fn income(&self) -> i64 {
        self.sales.iter().map(|s| s.income).sum()
    }
}

pub struct ConfirmPurchaseUseCase<S>
where
    S: ItemStore,
{
    store: Arc<S>,
}

impl<S> ConfirmPurchaseUseCase<S>
where
    S: ItemStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, shop_id: ShopId, user_id: UserId) -> ItemResult<PurchaseReceipt> {
        let mut tx = self.store.begin().await?;

        // Ordered by item so concurrent confirmations lock lines in the same order.
        let cart = tx.cart_lines(&shop_id, &user_id).await?;
        if cart.is_empty() {
            return Err(ItemError::CartEmpty);
        }

        let mut receipt = PurchaseReceipt {
            sales: Vec::with_capacity(cart.len()),
            promoted: Vec::new(),
        };

        for line in &cart {
            let mut stock = tx
                .lock_stock_line(&line.item_id, &shop_id)
                .await?
                .ok_or(ItemError::StockLineNotFound)?;

            stock.sell(line.quantity)?;

            let sale = Sale::record(&stock, user_id, line.quantity);
            tx.insert_sale(&sale).await?;

            if stock.is_depleted() {
                if let Some(next) = tx.oldest_queued(&line.item_id, &shop_id).await? {
                    stock.promote(&next);
                    tx.remove_queued(next.queue_id).await?;
                    receipt.promoted.push(next.queue_id);
                }
            }

            tx.save_stock_line(&stock).await?;
            receipt.sales.push(sale);
        }

        tx.clear_cart(&shop_id, &user_id).await?;
        tx.commit().await?;

        tracing::info!(
            shop_id = %shop_id,
            user_id = %user_id,
            lines = receipt.sales.len(),
            income = receipt.income(),
            promoted = receipt.promoted.len(),
            "Purchase confirmed"
        );

        Ok(receipt)
    }
}
