//! HTTP Handlers

use auth::{CurrentUser, ShopAccessRepository, UserRole};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use kernel::response::Detail;
use std::sync::Arc;

use crate::application::{CreateShopInput, CreateShopUseCase, ShopAccessUseCase};
use crate::domain::repository::ShopRepository;
use crate::error::ShopResult;
use crate::presentation::dto::{
    CreateShopRequest, ShopAccessRequest, ShopResponse, UserShopsResponse,
};

/// Shared state for shop handlers
#[derive(Clone)]
pub struct ShopAppState<S, A>
where
    S: ShopRepository + Clone + Send + Sync + 'static,
    A: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    pub shops: Arc<S>,
    pub access: Arc<A>,
}

/// POST /shops
pub async fn create_shop<S, A>(
    user: CurrentUser,
    State(state): State<ShopAppState<S, A>>,
    Json(req): Json<CreateShopRequest>,
) -> ShopResult<(StatusCode, Json<ShopResponse>)>
where
    S: ShopRepository + Clone + Send + Sync + 'static,
    A: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Owner)?;

    let shop = CreateShopUseCase::new(state.shops.clone())
        .execute(
            CreateShopInput {
                city: req.city,
                address: req.address,
            },
            user.user_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(shop.into())))
}

/// GET /shops/list
pub async fn list_shops<S, A>(
    user: CurrentUser,
    State(state): State<ShopAppState<S, A>>,
) -> ShopResult<Json<Vec<ShopResponse>>>
where
    S: ShopRepository + Clone + Send + Sync + 'static,
    A: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Owner)?;

    let shops = state.shops.list().await?;

    Ok(Json(shops.into_iter().map(ShopResponse::from).collect()))
}

/// GET /shops/access
pub async fn my_access<S, A>(
    user: CurrentUser,
    State(state): State<ShopAppState<S, A>>,
) -> ShopResult<Json<UserShopsResponse>>
where
    S: ShopRepository + Clone + Send + Sync + 'static,
    A: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    let shop_ids = ShopAccessUseCase::new(state.access.clone())
        .shops_of(user.user_id)
        .await?;

    Ok(Json(UserShopsResponse {
        user_id: user.user_id,
        shop_ids,
    }))
}

/// POST /shops/access
pub async fn grant_access<S, A>(
    user: CurrentUser,
    State(state): State<ShopAppState<S, A>>,
    Json(req): Json<ShopAccessRequest>,
) -> ShopResult<Detail>
where
    S: ShopRepository + Clone + Send + Sync + 'static,
    A: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Owner)?;

    ShopAccessUseCase::new(state.access.clone())
        .grant(req.shop_id, req.user_id)
        .await?;

    Ok(Detail::ok("access granted"))
}

/// DELETE /shops/access
pub async fn revoke_access<S, A>(
    user: CurrentUser,
    State(state): State<ShopAppState<S, A>>,
    Json(req): Json<ShopAccessRequest>,
) -> ShopResult<Detail>
where
    S: ShopRepository + Clone + Send + Sync + 'static,
    A: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Owner)?;

    ShopAccessUseCase::new(state.access.clone())
        .revoke(req.shop_id, req.user_id)
        .await?;

    Ok(Detail::ok("access revoked"))
}
