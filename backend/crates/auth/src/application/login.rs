//! Login Use Case
//!
//! Exchanges email + password for a signed access token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    /// The account email
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub expires_in: i64,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // A malformed email cannot belong to anyone.
        let email = Email::new(input.username).map_err(|_| AuthError::InvalidCredentials)?;
        let password = ClearTextPassword::for_verification(input.password);

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(user.user_id, user.user_role)?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.user_role,
            "User logged in"
        );

        Ok(LoginOutput {
            access_token: issued.token,
            expires_in: issued.expires_in,
        })
    }
}
