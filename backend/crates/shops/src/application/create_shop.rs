//! Create Shop Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::shop::Shop;
use crate::domain::repository::ShopRepository;
use crate::error::ShopResult;

pub struct CreateShopInput {
    pub city: String,
    pub address: String,
}

pub struct CreateShopUseCase<S>
where
    S: ShopRepository,
{
    shop_repo: Arc<S>,
}

impl<S> CreateShopUseCase<S>
where
    S: ShopRepository,
{
    pub fn new(shop_repo: Arc<S>) -> Self {
        Self { shop_repo }
    }

    /// The creator receives access to the new shop.
    pub async fn execute(&self, input: CreateShopInput, creator: UserId) -> ShopResult<Shop> {
        let shop = Shop::new(input.city, input.address)?;

        self.shop_repo.create_with_access(&shop, &creator).await?;

        tracing::info!(
            shop_id = %shop.shop_id,
            creator = %creator,
            "Shop created"
        );

        Ok(shop)
    }
}
