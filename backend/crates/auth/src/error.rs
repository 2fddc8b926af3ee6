//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_sqlx;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email or wrong password; the two are not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Could not validate credentials")]
    TokenInvalid,

    /// Caller's role weight is below the required role
    #[error("Insufficient role")]
    InsufficientRole,

    /// Caller has no access grant for the requested shop
    #[error("No access to this shop")]
    ShopAccessDenied,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenExpired
            | AuthError::TokenInvalid => ErrorKind::Unauthorized,
            AuthError::InsufficientRole | AuthError::ShopAccessDenied => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::Database(e) => classify_sqlx(e).0,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(e) => {
                let (kind, message) = classify_sqlx(e);
                AppError::new(kind, message)
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InsufficientRole | AuthError::ShopAccessDenied => {
                tracing::warn!(error = %self, "Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Invalid => AuthError::TokenInvalid,
            TokenError::KeyLoad(msg) | TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
