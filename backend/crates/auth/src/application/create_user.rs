//! Create User Use Case
//!
//! Owners register staff accounts; there is no self sign-up.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Create user input
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Create user use case
pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: CreateUserInput) -> AuthResult<UserId> {
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let password_hash = password.hash(self.config.pepper())?;

        let user = User::new(email, password_hash, input.role);

        // Unique index on email answers the duplicate case.
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.user_role,
            "User created"
        );

        Ok(user.user_id)
    }
}
