//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap;
pub mod config;
pub mod create_user;
pub mod login;
pub mod token;
pub mod update_user;

// Re-exports
pub use bootstrap::ensure_owner;
pub use config::AuthConfig;
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use token::{AccessClaims, IssuedToken, TokenService};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
