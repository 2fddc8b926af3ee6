//! Repository Traits
//!
//! Single-statement reads and writes go through [`ItemRepository`].
//! Stock, queue and cart changes that must hold together run inside a
//! [`StockTransaction`] opened by an [`ItemStore`].

use std::future::Future;

use kernel::id::{ItemId, ShopId, UserId};

use crate::domain::entity::cart::CartLine;
use crate::domain::entity::item::{Item, ItemSummary};
use crate::domain::entity::sale::{Sale, SalesDay};
use crate::domain::entity::stock::{QueuedShipment, Shipment, ShopStockEntry, StockLine};
use crate::domain::services::SalesPage;
use crate::error::ItemResult;

/// Result of deleting a referenced row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// Other rows still reference it; nothing was changed
    HasDependents,
}

#[trait_variant::make(ItemRepository: Send)]
pub trait LocalItemRepository {
    async fn create_item(&self, item: &Item) -> ItemResult<()>;

    async fn list_items(&self) -> ItemResult<Vec<ItemSummary>>;

    async fn delete_item(&self, item_id: &ItemId) -> ItemResult<DeleteOutcome>;

    async fn shop_stock(&self, shop_id: &ShopId) -> ItemResult<Vec<ShopStockEntry>>;

    async fn delete_stock_line(&self, item_id: &ItemId, shop_id: &ShopId)
    -> ItemResult<DeleteOutcome>;

    async fn cart(&self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<Vec<CartLine>>;

    async fn clear_cart(&self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<u64>;

    /// Per-day sale counts and income, newest day first
    async fn sales_by_day(&self, page: SalesPage) -> ItemResult<Vec<SalesDay>>;
}

/// Opens stock transactions.
///
/// Dropping a transaction without calling `commit` rolls it back.
pub trait ItemStore: Send + Sync {
    type Tx: StockTransaction + Send;

    fn begin(&self) -> impl Future<Output = ItemResult<Self::Tx>> + Send;
}

/// Primitive operations inside one stock transaction
#[trait_variant::make(StockTransaction: Send)]
pub trait LocalStockTransaction {
    async fn item_exists(&mut self, item_id: &ItemId) -> ItemResult<bool>;

    /// Read the active line and hold it until commit or rollback.
    async fn lock_stock_line(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
    ) -> ItemResult<Option<StockLine>>;

    /// Insert a new active line; false if one already exists.
    async fn insert_stock_line(&mut self, line: &StockLine) -> ItemResult<bool>;

    async fn save_stock_line(&mut self, line: &StockLine) -> ItemResult<()>;

    /// Append to the pair's queue and return the new `queue_id`.
    async fn enqueue(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
        shipment: &Shipment,
    ) -> ItemResult<i64>;

    async fn oldest_queued(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
    ) -> ItemResult<Option<QueuedShipment>>;

    async fn remove_queued(&mut self, queue_id: i64) -> ItemResult<()>;

    async fn cart_line(
        &mut self,
        shop_id: &ShopId,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> ItemResult<Option<CartLine>>;

    async fn cart_lines(&mut self, shop_id: &ShopId, user_id: &UserId)
    -> ItemResult<Vec<CartLine>>;

    /// Insert or overwrite the line's quantity.
    async fn save_cart_line(&mut self, line: &CartLine) -> ItemResult<()>;

    async fn delete_cart_line(
        &mut self,
        shop_id: &ShopId,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> ItemResult<()>;

    async fn clear_cart(&mut self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<()>;

    async fn insert_sale(&mut self, sale: &Sale) -> ItemResult<()>;

    async fn commit(self) -> ItemResult<()>;
}
