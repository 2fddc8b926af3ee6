//! Stock lines and shipments

use chrono::{DateTime, Utc};
use kernel::id::{ItemId, ShopId};

use crate::error::{ItemError, ItemResult};

/// A received batch: unit price, count and unit purchase price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shipment {
    pub price: i32,
    pub quantity: i32,
    pub purchase_price: i32,
}

impl Shipment {
    /// All three values must be positive.
    pub fn new(price: i32, quantity: i32, purchase_price: i32) -> ItemResult<Self> {
        for (name, value) in [
            ("price", price),
            ("quantity", quantity),
            ("purchase_price", purchase_price),
        ] {
            if value <= 0 {
                return Err(ItemError::Validation(format!("{} must be positive", name)));
            }
        }

        Ok(Self {
            price,
            quantity,
            purchase_price,
        })
    }
}

/// Active stock of one item in one shop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLine {
    pub item_id: ItemId,
    pub shop_id: ShopId,
    pub price: i32,
    /// Never negative
    pub quantity: i32,
    pub purchase_price: i32,
}

impl StockLine {
    pub fn from_shipment(item_id: ItemId, shop_id: ShopId, shipment: Shipment) -> Self {
        Self {
            item_id,
            shop_id,
            price: shipment.price,
            quantity: shipment.quantity,
            purchase_price: shipment.purchase_price,
        }
    }

    /// Take `quantity` units off the line.
    pub fn sell(&mut self, quantity: i32) -> ItemResult<()> {
        if quantity > self.quantity {
            return Err(ItemError::InsufficientStock);
        }
        self.quantity -= quantity;
        Ok(())
    }

    pub fn is_depleted(&self) -> bool {
        self.quantity == 0
    }

    /// Replace price, quantity and purchase price with a queued shipment.
    pub fn promote(&mut self, next: &QueuedShipment) {
        self.restock(&next.shipment);
    }

    pub fn restock(&mut self, shipment: &Shipment) {
        self.price = shipment.price;
        self.quantity = shipment.quantity;
        self.purchase_price = shipment.purchase_price;
    }
}

/// Shipment waiting behind an active stock line; lower `queue_id` is older
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedShipment {
    pub queue_id: i64,
    pub item_id: ItemId,
    pub shop_id: ShopId,
    pub shipment: Shipment,
    pub created_at: DateTime<Utc>,
}

/// Stock line joined with its item name and the queued total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopStockEntry {
    pub item_id: ItemId,
    pub name: String,
    pub price: i32,
    pub quantity: i32,
    pub purchase_price: i32,
    pub queued_quantity: i64,
}
