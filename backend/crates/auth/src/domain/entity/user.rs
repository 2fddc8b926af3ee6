//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_role::UserRole};

/// Staff account
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique; doubles as the login name
    pub email: Email,
    pub password_hash: HashedPassword,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, password_hash: HashedPassword, user_role: UserRole) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            user_role,
            created_at: Utc::now(),
        }
    }
}
