//! HTTP Handlers

use axum::extract::State;
use axum::{Form, Json};
use kernel::response::Detail;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    CreateUserInput, CreateUserUseCase, LoginInput, LoginUseCase, UpdateUserInput,
    UpdateUserUseCase,
};
use crate::domain::entity::principal::CurrentUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;
use crate::presentation::dto::{CreateUserRequest, LoginForm, TokenResponse, UpdateUserRequest};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<LoginForm>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            username: form.username,
            password: form.password,
        })
        .await?;

    Ok(Json(TokenResponse::bearer(
        output.access_token,
        output.expires_in,
    )))
}

// ============================================================================
// Users
// ============================================================================

/// POST /users
pub async fn create_user<R>(
    user: CurrentUser,
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<Detail>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Owner)?;

    let use_case = CreateUserUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(CreateUserInput {
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok(Detail::created("user signed up"))
}

/// PATCH /users
pub async fn update_user<R>(
    user: CurrentUser,
    State(state): State<AuthAppState<R>>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Detail>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    user.require_role(UserRole::Owner)?;

    let use_case = UpdateUserUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(UpdateUserInput {
            email: req.email,
            new_email: req.new_email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok(Detail::ok("user updated"))
}
