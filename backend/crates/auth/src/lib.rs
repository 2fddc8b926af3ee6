//! Auth (Authentication & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the token service
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Login with email + password, answered with an RS256 bearer token
//! - Owner-only staff account management
//! - Role gate (worker < admin < owner) and per-shop access gate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Tokens expire after 12 hours and are verified with zero leeway

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use domain::{CurrentUser, GrantOutcome, ShopAccessRepository, ShopScope, UserRole};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
