//! Update User Use Case

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Update user input. `email` selects the account; the rest are changes.
pub struct UpdateUserInput {
    pub email: String,
    pub new_email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

impl UpdateUserInput {
    fn is_empty(&self) -> bool {
        self.new_email.is_none() && self.password.is_none() && self.role.is_none()
    }
}

/// Update user use case
pub struct UpdateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> UpdateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: UpdateUserInput) -> AuthResult<()> {
        if input.is_empty() {
            return Err(AuthError::Validation("Empty data".to_string()));
        }

        let new_email = input
            .new_email
            .map(Email::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let new_password = input
            .password
            .map(ClearTextPassword::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let email = Email::new(input.email).map_err(|_| AuthError::UserNotFound)?;
        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(new_email) = new_email {
            user.email = new_email;
        }
        if let Some(password) = new_password {
            user.password_hash = password.hash(self.config.pepper())?;
        }
        if let Some(role) = input.role {
            user.user_role = role;
        }

        self.user_repo.update(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.user_role,
            "User updated"
        );

        Ok(())
    }
}
