//! Shops Router

use auth::middleware::require_auth;
use auth::{PgAuthRepository, ShopAccessRepository, TokenService};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::ShopRepository;
use crate::infra::postgres::PgShopRepository;
use crate::presentation::handlers::{self, ShopAppState};

/// Create the Shops router with PostgreSQL repositories
pub fn shops_router(
    shops: PgShopRepository,
    access: PgAuthRepository,
    tokens: Arc<TokenService>,
) -> Router {
    shops_router_generic(shops, access, tokens)
}

/// Every route requires a bearer token.
pub fn shops_router_generic<S, A>(shops: S, access: A, tokens: Arc<TokenService>) -> Router
where
    S: ShopRepository + Clone + Send + Sync + 'static,
    A: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    let state = ShopAppState {
        shops: Arc::new(shops),
        access: Arc::new(access),
    };

    Router::new()
        .route("/", post(handlers::create_shop::<S, A>))
        .route("/list", get(handlers::list_shops::<S, A>))
        .route(
            "/access",
            get(handlers::my_access::<S, A>)
                .post(handlers::grant_access::<S, A>)
                .delete(handlers::revoke_access::<S, A>),
        )
        .route_layer(middleware::from_fn_with_state(tokens, require_auth))
        .with_state(state)
}
