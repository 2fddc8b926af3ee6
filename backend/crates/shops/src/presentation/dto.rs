//! Data Transfer Objects

use chrono::{DateTime, Utc};
use kernel::id::{ShopId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::shop::Shop;

#[derive(Debug, Deserialize)]
pub struct CreateShopRequest {
    pub city: String,
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopResponse {
    pub shop_id: ShopId,
    pub city: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<Shop> for ShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            shop_id: shop.shop_id,
            city: shop.city,
            address: shop.address,
            created_at: shop.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShopAccessRequest {
    pub shop_id: ShopId,
    pub user_id: UserId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserShopsResponse {
    pub user_id: UserId,
    pub shop_ids: Vec<ShopId>,
}
