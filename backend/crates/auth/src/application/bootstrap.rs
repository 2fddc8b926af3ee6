//! First-owner bootstrap
//!
//! A fresh database has no users and only owners can create users, so start-up
//! may seed one owner account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::create_user::{CreateUserInput, CreateUserUseCase};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

/// Create an owner with the given credentials if no user exists yet.
///
/// Returns true when an account was created.
pub async fn ensure_owner<U>(
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    email: String,
    password: String,
) -> AuthResult<bool>
where
    U: UserRepository,
{
    if user_repo.count().await? > 0 {
        tracing::debug!("Users present, skipping owner bootstrap");
        return Ok(false);
    }

    let use_case = CreateUserUseCase::new(user_repo, config);
    let user_id = use_case
        .execute(CreateUserInput {
            email,
            password,
            role: UserRole::Owner,
        })
        .await?;

    tracing::info!(user_id = %user_id, "Bootstrapped owner account");

    Ok(true)
}
