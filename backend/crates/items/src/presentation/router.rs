//! Items Router

use auth::middleware::{ShopAccessState, require_auth, require_shop_access};
use auth::{PgAuthRepository, ShopAccessRepository, TokenService};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::domain::repository::{ItemRepository, ItemStore};
use crate::infra::postgres::PgItemStore;
use crate::presentation::handlers::{self, ItemAppState};

/// Create the Items router with PostgreSQL repositories
pub fn items_router(
    store: PgItemStore,
    access: PgAuthRepository,
    tokens: Arc<TokenService>,
) -> Router {
    items_router_generic(store, access, tokens)
}

/// Catalog routes need a role; `/shop` and `/cart` routes also need a grant
/// for the `shop_id` query parameter.
pub fn items_router_generic<S, A>(store: S, access: A, tokens: Arc<TokenService>) -> Router
where
    S: ItemStore + ItemRepository + Clone + Send + Sync + 'static,
    A: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    let state = ItemAppState {
        store: Arc::new(store),
    };

    let shop_scoped = Router::new()
        .route(
            "/shop",
            get(handlers::shop_stock::<S>).delete(handlers::delete_stock_line::<S>),
        )
        .route("/shop/queue", post(handlers::receive_shipment::<S>))
        .route(
            "/cart",
            post(handlers::add_to_cart::<S>)
                .get(handlers::list_cart::<S>)
                .delete(handlers::remove_from_cart::<S>),
        )
        .route("/cart/all", delete(handlers::clear_cart::<S>))
        .route("/cart/confirmm", post(handlers::confirm_purchase::<S>))
        .route_layer(middleware::from_fn_with_state(
            ShopAccessState {
                repo: Arc::new(access),
            },
            require_shop_access::<A>,
        ));

    Router::new()
        .route(
            "/",
            post(handlers::create_item::<S>).delete(handlers::delete_item::<S>),
        )
        .route("/list", get(handlers::list_items::<S>))
        .route("/sold", get(handlers::sales_summary::<S>))
        .merge(shop_scoped)
        .route_layer(middleware::from_fn_with_state(tokens, require_auth))
        .with_state(state)
}
