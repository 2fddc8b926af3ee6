//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - The wire error type and SQLSTATE classification
//! - Typed identifiers for users, shops and items
//! - The `{"detail": ...}` response envelope shared by every route group
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
#[cfg(feature = "axum")]
pub mod response;
