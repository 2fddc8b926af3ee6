//! Repository Traits

use kernel::id::UserId;

use crate::domain::entity::shop::Shop;
use crate::error::ShopResult;

#[trait_variant::make(ShopRepository: Send)]
pub trait LocalShopRepository {
    /// Insert the shop and grant `creator` access to it atomically.
    async fn create_with_access(&self, shop: &Shop, creator: &UserId) -> ShopResult<()>;

    async fn list(&self) -> ShopResult<Vec<Shop>>;
}
