//! Item Error Types

use auth::AuthError;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_sqlx;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ItemResult<T> = Result<T, ItemError>;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found")]
    ItemNotFound,

    /// The item has no active stock line in the shop
    #[error("Item not found in shop")]
    StockLineNotFound,

    #[error("You can't delete an item from the cart.")]
    CartLineNotFound,

    #[error("The shopping cart is empty.")]
    CartEmpty,

    /// Cart quantity would exceed the active stock
    #[error("Exceed available quantity")]
    ExceedsAvailable,

    /// Active stock is below a cart quantity at confirmation
    #[error("There is not enough product in the store.")]
    InsufficientStock,

    #[error("It is not possible to delete an item because it is associated with other data.")]
    HasDependents,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ItemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ItemError::ItemNotFound
            | ItemError::StockLineNotFound
            | ItemError::CartLineNotFound
            | ItemError::CartEmpty => ErrorKind::NotFound,
            ItemError::ExceedsAvailable
            | ItemError::InsufficientStock
            | ItemError::HasDependents => ErrorKind::Conflict,
            ItemError::Validation(_) => ErrorKind::UnprocessableEntity,
            ItemError::Auth(e) => e.kind(),
            ItemError::Database(e) => classify_sqlx(e).0,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            ItemError::Auth(e) => e.to_app_error(),
            ItemError::Database(e) => {
                let (kind, message) = classify_sqlx(e);
                AppError::new(kind, message)
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ItemError::Database(e) => {
                tracing::error!(error = %e, "Item database error");
            }
            ItemError::ExceedsAvailable | ItemError::InsufficientStock => {
                tracing::info!(error = %self, "Stock conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Item error");
            }
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        match self {
            ItemError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}
