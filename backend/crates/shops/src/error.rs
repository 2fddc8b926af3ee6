//! Shop Error Types

use auth::AuthError;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_sqlx;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ShopResult<T> = Result<T, ShopError>;

#[derive(Debug, Error)]
pub enum ShopError {
    /// Grant target shop or user does not exist
    #[error("Shop or user not found")]
    ShopOrUserNotFound,

    #[error("User already has access to this shop")]
    AccessAlreadyGranted,

    #[error("Access not found")]
    AccessNotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ShopError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::ShopOrUserNotFound | ShopError::AccessNotFound => ErrorKind::NotFound,
            ShopError::AccessAlreadyGranted => ErrorKind::Conflict,
            ShopError::Validation(_) => ErrorKind::UnprocessableEntity,
            ShopError::Auth(e) => e.kind(),
            ShopError::Database(e) => classify_sqlx(e).0,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            ShopError::Auth(e) => e.to_app_error(),
            ShopError::Database(e) => {
                let (kind, message) = classify_sqlx(e);
                AppError::new(kind, message)
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ShopError::Database(e) => {
                tracing::error!(error = %e, "Shop database error");
            }
            _ => {
                tracing::debug!(error = %self, "Shop error");
            }
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        match self {
            // Auth errors carry their own logging.
            ShopError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}
