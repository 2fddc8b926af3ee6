//! Shop Access Use Case
//!
//! Grant, revoke and self-listing of shop access.

use std::sync::Arc;

use auth::{GrantOutcome, ShopAccessRepository};
use kernel::id::{ShopId, UserId};

use crate::error::{ShopError, ShopResult};

pub struct ShopAccessUseCase<A>
where
    A: ShopAccessRepository,
{
    access_repo: Arc<A>,
}

impl<A> ShopAccessUseCase<A>
where
    A: ShopAccessRepository,
{
    pub fn new(access_repo: Arc<A>) -> Self {
        Self { access_repo }
    }

    pub async fn grant(&self, shop_id: ShopId, user_id: UserId) -> ShopResult<()> {
        match self.access_repo.grant(&shop_id, &user_id).await? {
            GrantOutcome::Granted => {
                tracing::info!(shop_id = %shop_id, user_id = %user_id, "Shop access granted");
                Ok(())
            }
            GrantOutcome::AlreadyGranted => Err(ShopError::AccessAlreadyGranted),
            GrantOutcome::MissingParty => Err(ShopError::ShopOrUserNotFound),
        }
    }

    pub async fn revoke(&self, shop_id: ShopId, user_id: UserId) -> ShopResult<()> {
        if !self.access_repo.revoke(&shop_id, &user_id).await? {
            return Err(ShopError::AccessNotFound);
        }

        tracing::info!(shop_id = %shop_id, user_id = %user_id, "Shop access revoked");

        Ok(())
    }

    pub async fn shops_of(&self, user_id: UserId) -> ShopResult<Vec<ShopId>> {
        Ok(self.access_repo.shop_ids_for(&user_id).await?)
    }
}
