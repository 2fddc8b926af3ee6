//! Auth Router

use axum::{Router, middleware, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
///
/// `/login` is public; `/users` requires a bearer token.
pub fn auth_router(
    repo: PgAuthRepository,
    tokens: Arc<TokenService>,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, tokens, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, tokens: Arc<TokenService>, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    let users = Router::new()
        .route(
            "/",
            post(handlers::create_user::<R>).patch(handlers::update_user::<R>),
        )
        .route_layer(middleware::from_fn_with_state(tokens, require_auth));

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .nest("/users", users)
        .with_state(state)
}
