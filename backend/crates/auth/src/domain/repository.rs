//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{ShopId, UserId};

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user; `EmailTaken` if the email is registered
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Persist email, password hash and role; `EmailTaken` on collision
    async fn update(&self, user: &User) -> AuthResult<()>;

    async fn count(&self) -> AuthResult<i64>;
}

/// Outcome of granting shop access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    Granted,
    AlreadyGranted,
    /// The shop or the user does not exist
    MissingParty,
}

/// Shop access grant storage
#[trait_variant::make(ShopAccessRepository: Send)]
pub trait LocalShopAccessRepository {
    async fn has_access(&self, user_id: &UserId, shop_id: &ShopId) -> AuthResult<bool>;

    async fn shop_ids_for(&self, user_id: &UserId) -> AuthResult<Vec<ShopId>>;

    async fn grant(&self, shop_id: &ShopId, user_id: &UserId) -> AuthResult<GrantOutcome>;

    /// Returns false when there was no such grant
    async fn revoke(&self, shop_id: &ShopId, user_id: &UserId) -> AuthResult<bool>;
}
