//! Data Transfer Objects

use chrono::NaiveDate;
use kernel::id::ItemId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::cart::CartLine;
use crate::domain::entity::item::ItemSummary;
use crate::domain::entity::sale::SalesDay;
use crate::domain::entity::stock::ShopStockEntry;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemResponse {
    pub item_id: ItemId,
}

/// Body of the delete routes
#[derive(Debug, Deserialize)]
pub struct ItemIdRequest {
    pub item_id: ItemId,
}

#[derive(Debug, Serialize)]
pub struct ItemSummaryResponse {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: i64,
}

impl From<ItemSummary> for ItemSummaryResponse {
    fn from(summary: ItemSummary) -> Self {
        Self {
            item_id: summary.item_id,
            name: summary.name,
            quantity: summary.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShipmentRequest {
    pub item_id: ItemId,
    pub price: i32,
    pub quantity: i32,
    pub purchase_price: i32,
}

#[derive(Debug, Serialize)]
pub struct ShopStockResponse {
    pub item_id: ItemId,
    pub name: String,
    pub price: i32,
    pub quantity: i32,
    pub purchase_price: i32,
    pub queued_quantity: i64,
}

impl From<ShopStockEntry> for ShopStockResponse {
    fn from(entry: ShopStockEntry) -> Self {
        Self {
            item_id: entry.item_id,
            name: entry.name,
            price: entry.price,
            quantity: entry.quantity,
            purchase_price: entry.purchase_price,
            queued_quantity: entry.queued_quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CartItemRequest {
    pub item_id: ItemId,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub item_id: ItemId,
    pub quantity: i32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            item_id: line.item_id,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SoldQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SalesDayResponse {
    pub date: NaiveDate,
    pub count: i64,
    pub income: i64,
}

impl From<SalesDay> for SalesDayResponse {
    fn from(day: SalesDay) -> Self {
        Self {
            date: day.date,
            count: day.count,
            income: day.income,
        }
    }
}
