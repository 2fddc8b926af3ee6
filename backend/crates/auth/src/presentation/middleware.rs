//! Auth Middleware
//!
//! `require_auth` turns a bearer token into a [`CurrentUser`];
//! `require_shop_access` additionally checks the `shop_id` query parameter
//! against the caller's grants and records a [`ShopScope`].

use axum::body::Body;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::ShopId;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::entity::principal::{CurrentUser, ShopScope};
use crate::domain::repository::ShopAccessRepository;
use crate::error::AuthError;

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Middleware that requires a valid access token
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;
    let user = tokens.verify(token)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware state for the shop-access gate
#[derive(Clone)]
pub struct ShopAccessState<R>
where
    R: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

#[derive(Deserialize)]
struct ShopQuery {
    shop_id: ShopId,
}

/// Middleware that requires a grant for `?shop_id=`
///
/// Must run after [`require_auth`].
pub async fn require_shop_access<R>(
    State(state): State<ShopAccessState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: ShopAccessRepository + Clone + Send + Sync + 'static,
{
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .copied()
        .ok_or(AuthError::MissingToken)?;

    let Query(query) = Query::<ShopQuery>::try_from_uri(req.uri())
        .map_err(|e| AuthError::Validation(e.body_text()))?;

    if !state.repo.has_access(&user.user_id, &query.shop_id).await? {
        tracing::debug!(user_id = %user.user_id, shop_id = %query.shop_id, "No shop grant");
        return Err(AuthError::ShopAccessDenied);
    }

    req.extensions_mut().insert(ShopScope {
        shop_id: query.shop_id,
    });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or(AuthError::MissingToken)
    }
}

impl<S> FromRequestParts<S> for ShopScope
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ShopScope>()
            .copied()
            .ok_or(AuthError::ShopAccessDenied)
    }
}
