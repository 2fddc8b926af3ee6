//! HTTP Handlers

use auth::{CurrentUser, ShopScope, UserRole};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use kernel::response::Detail;
use std::sync::Arc;

use crate::application::{
    CartUseCase, CatalogUseCase, ConfirmPurchaseUseCase, IntakeOutcome, ReceiveShipmentInput,
    ReceiveShipmentUseCase, SalesReportUseCase, ShopStockUseCase,
};
use crate::domain::repository::{ItemRepository, ItemStore};
use crate::error::{ItemError, ItemResult};
use crate::presentation::dto::{
    CartItemRequest, CartLineResponse, CreateItemRequest, CreateItemResponse, ItemIdRequest,
    ItemSummaryResponse, SalesDayResponse, ShipmentRequest, ShopStockResponse, SoldQuery,
};

/// Shared state for item handlers
#[derive(Clone)]
pub struct ItemAppState<S>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
}

// ============================================================================
// Catalog
// ============================================================================

/// POST /items
pub async fn create_item<S>(
    user: CurrentUser,
    State(state): State<ItemAppState<S>>,
    Json(req): Json<CreateItemRequest>,
) -> ItemResult<(StatusCode, Json<CreateItemResponse>)>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Admin)?;

    let item_id = CatalogUseCase::new(state.store.clone())
        .create(req.name)
        .await?;

    Ok((StatusCode::CREATED, Json(CreateItemResponse { item_id })))
}

/// GET /items/list
pub async fn list_items<S>(
    user: CurrentUser,
    State(state): State<ItemAppState<S>>,
) -> ItemResult<Json<Vec<ItemSummaryResponse>>>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Admin)?;

    let items = CatalogUseCase::new(state.store.clone()).list().await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// DELETE /items
pub async fn delete_item<S>(
    user: CurrentUser,
    State(state): State<ItemAppState<S>>,
    Json(req): Json<ItemIdRequest>,
) -> ItemResult<Detail>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Admin)?;

    CatalogUseCase::new(state.store.clone())
        .delete(req.item_id)
        .await?;

    Ok(Detail::ok("item deleted"))
}

/// GET /items/sold?offset&limit
pub async fn sales_summary<S>(
    user: CurrentUser,
    State(state): State<ItemAppState<S>>,
    query: Result<Query<SoldQuery>, QueryRejection>,
) -> ItemResult<Json<Vec<SalesDayResponse>>>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Owner)?;

    let Query(query) = query.map_err(|e| ItemError::Validation(e.body_text()))?;

    let days = SalesReportUseCase::new(state.store.clone())
        .execute(query.offset, query.limit)
        .await?;

    Ok(Json(days.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Shop stock
// ============================================================================

/// GET /items/shop?shop_id
pub async fn shop_stock<S>(
    scope: ShopScope,
    State(state): State<ItemAppState<S>>,
) -> ItemResult<Json<Vec<ShopStockResponse>>>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    let entries = ShopStockUseCase::new(state.store.clone())
        .list(scope.shop_id)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// DELETE /items/shop?shop_id
pub async fn delete_stock_line<S>(
    user: CurrentUser,
    scope: ShopScope,
    State(state): State<ItemAppState<S>>,
    Json(req): Json<ItemIdRequest>,
) -> ItemResult<Detail>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Admin)?;

    ShopStockUseCase::new(state.store.clone())
        .delete(scope.shop_id, req.item_id)
        .await?;

    Ok(Detail::ok("item deleted"))
}

/// POST /items/shop/queue?shop_id
pub async fn receive_shipment<S>(
    scope: ShopScope,
    State(state): State<ItemAppState<S>>,
    Json(req): Json<ShipmentRequest>,
) -> ItemResult<Detail>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    let outcome = ReceiveShipmentUseCase::new(state.store.clone())
        .execute(
            scope.shop_id,
            ReceiveShipmentInput {
                item_id: req.item_id,
                price: req.price,
                quantity: req.quantity,
                purchase_price: req.purchase_price,
            },
        )
        .await?;

    Ok(match outcome {
        IntakeOutcome::Stocked => Detail::created("item added to shop"),
        IntakeOutcome::Queued { .. } => Detail::accepted("item added to shop queue"),
    })
}

// ============================================================================
// Cart
// ============================================================================

/// POST /items/cart?shop_id
pub async fn add_to_cart<S>(
    user: CurrentUser,
    scope: ShopScope,
    State(state): State<ItemAppState<S>>,
    Json(req): Json<CartItemRequest>,
) -> ItemResult<Detail>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    CartUseCase::new(state.store.clone())
        .add(scope.shop_id, user.user_id, req.item_id, req.quantity)
        .await?;

    Ok(Detail::created("item added to cart"))
}

/// GET /items/cart?shop_id
pub async fn list_cart<S>(
    user: CurrentUser,
    scope: ShopScope,
    State(state): State<ItemAppState<S>>,
) -> ItemResult<Json<Vec<CartLineResponse>>>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    let lines = state.store.cart(&scope.shop_id, &user.user_id).await?;

    Ok(Json(lines.into_iter().map(Into::into).collect()))
}

/// DELETE /items/cart?shop_id
pub async fn remove_from_cart<S>(
    user: CurrentUser,
    scope: ShopScope,
    State(state): State<ItemAppState<S>>,
    Json(req): Json<CartItemRequest>,
) -> ItemResult<Detail>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    CartUseCase::new(state.store.clone())
        .remove(scope.shop_id, user.user_id, req.item_id, req.quantity)
        .await?;

    Ok(Detail::ok("item deleted from cart"))
}

/// DELETE /items/cart/all?shop_id
pub async fn clear_cart<S>(
    user: CurrentUser,
    scope: ShopScope,
    State(state): State<ItemAppState<S>>,
) -> ItemResult<Detail>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    state
        .store
        .clear_cart(&scope.shop_id, &user.user_id)
        .await?;

    Ok(Detail::ok("cleaned cart"))
}

/// POST /items/cart/confirmm?shop_id
pub async fn confirm_purchase<S>(
    user: CurrentUser,
    scope: ShopScope,
    State(state): State<ItemAppState<S>>,
) -> ItemResult<Detail>
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
{
    ConfirmPurchaseUseCase::new(state.store.clone())
        .execute(scope.shop_id, user.user_id)
        .await?;

    Ok(Detail::ok("purchase been confirmed"))
}
