//! Receive Shipment Use Case
//!
//! A shipment becomes the active stock line when the shop has none for the
//! item, or refills a sold-out line whose queue is empty. Otherwise it waits
//! in the shop's queue.

use std::sync::Arc;

use kernel::id::{ItemId, ShopId};

use crate::domain::entity::stock::{Shipment, StockLine};
use crate::domain::repository::{ItemStore, StockTransaction};
use crate::error::{ItemError, ItemResult};

pub struct ReceiveShipmentInput {
    pub item_id: ItemId,
    pub price: i32,
    pub quantity: i32,
    pub purchase_price: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// Became the active stock line
    Stocked,
    Queued { queue_id: i64 },
}

pub struct ReceiveShipmentUseCase<S>
where
    S: ItemStore,
{
    store: Arc<S>,
}

impl<S> ReceiveShipmentUseCase<S>
where
    S: ItemStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        shop_id: ShopId,
        input: ReceiveShipmentInput,
    ) -> ItemResult<IntakeOutcome> {
        let shipment = Shipment::new(input.price, input.quantity, input.purchase_price)?;
        let item_id = input.item_id;

        let mut tx = self.store.begin().await?;

        if !tx.item_exists(&item_id).await? {
            return Err(ItemError::ItemNotFound);
        }

        let outcome = match tx.lock_stock_line(&item_id, &shop_id).await? {
            Some(mut line) => {
                if line.is_depleted() && tx.oldest_queued(&item_id, &shop_id).await?.is_none() {
                    line.restock(&shipment);
                    tx.save_stock_line(&line).await?;
                    IntakeOutcome::Stocked
                } else {
                    IntakeOutcome::Queued {
                        queue_id: tx.enqueue(&item_id, &shop_id, &shipment).await?,
                    }
                }
            }
            None => {
                let line = StockLine::from_shipment(item_id, shop_id, shipment);
                if tx.insert_stock_line(&line).await? {
                    IntakeOutcome::Stocked
                } else {
                    // A concurrent intake created the line first.
                    IntakeOutcome::Queued {
                        queue_id: tx.enqueue(&item_id, &shop_id, &shipment).await?,
                    }
                }
            }
        };

        tx.commit().await?;

        tracing::info!(
            item_id = %item_id,
            shop_id = %shop_id,
            quantity = shipment.quantity,
            outcome = ?outcome,
            "Shipment received"
        );

        Ok(outcome)
    }
}
