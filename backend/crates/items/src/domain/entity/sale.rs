//! Sale ledger

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ItemId, ShopId, UserId};
use uuid::Uuid;

use crate::domain::entity::stock::StockLine;

/// Append-only record of a confirmed purchase line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub sale_id: Uuid,
    pub item_id: ItemId,
    pub user_id: UserId,
    pub shop_id: ShopId,
    pub price: i32,
    pub quantity: i32,
    pub income: i64,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Record `quantity` units sold from `line` at its current prices.
    pub fn record(line: &StockLine, user_id: UserId, quantity: i32) -> Self {
        Self {
            sale_id: Uuid::new_v4(),
            item_id: line.item_id,
            user_id,
            shop_id: line.shop_id,
            price: line.price,
            quantity,
            income: income(line.price, line.purchase_price, quantity),
            created_at: Utc::now(),
        }
    }
}

/// `(price - purchase_price) * quantity`, widened so it cannot overflow.
pub fn income(price: i32, purchase_price: i32, quantity: i32) -> i64 {
    (i64::from(price) - i64::from(purchase_price)) * i64::from(quantity)
}

/// Sales of one UTC calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesDay {
    pub date: NaiveDate,
    pub count: i64,
    pub income: i64,
}
