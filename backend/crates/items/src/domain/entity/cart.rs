//! Cart

use kernel::id::{ItemId, ShopId, UserId};

/// Reserved quantity of one item in one user's cart for one shop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub shop_id: ShopId,
    pub user_id: UserId,
    pub item_id: ItemId,
    /// Always positive
    pub quantity: i32,
}
