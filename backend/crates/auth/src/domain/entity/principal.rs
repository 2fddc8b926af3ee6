//! Authenticated caller and shop scope
//!
//! Both are placed into request extensions by the middleware and read back by
//! handlers.

use kernel::id::{ShopId, UserId};

use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Identity carried by a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl CurrentUser {
    /// Reject callers whose role weight is below `required`.
    pub fn require_role(&self, required: UserRole) -> AuthResult<()> {
        if self.role.at_least(required) {
            Ok(())
        } else {
            Err(AuthError::InsufficientRole)
        }
    }
}

/// Shop the caller has been verified to hold a grant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopScope {
    pub shop_id: ShopId,
}
