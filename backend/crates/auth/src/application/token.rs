//! Access Token Service
//!
//! Issues and verifies the bearer tokens handed out at login.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::token::TokenKeys;
use serde::{Deserialize, Serialize};

use crate::domain::entity::principal::CurrentUser;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

/// Claims embedded in every access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: UserId,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Seconds until `exp`
    pub expires_in: i64,
}

#[derive(Debug, Clone)]
pub struct TokenService {
    keys: TokenKeys,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(keys: TokenKeys, ttl_secs: i64) -> Self {
        Self { keys, ttl_secs }
    }

    pub fn issue(&self, user_id: UserId, role: UserRole) -> AuthResult<IssuedToken> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Issue a token as if signed at `now`.
    pub fn issue_at(
        &self,
        user_id: UserId,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let iat = now.timestamp();
        let claims = AccessClaims {
            sub: user_id,
            role,
            iat,
            exp: iat + self.ttl_secs,
        };

        let token = self.keys.sign(&claims)?;

        Ok(IssuedToken {
            token,
            expires_in: claims.exp - claims.iat,
        })
    }

    /// Check signature and expiry and return the caller identity.
    pub fn verify(&self, token: &str) -> AuthResult<CurrentUser> {
        let claims: AccessClaims = self.keys.verify(token)?;

        Ok(CurrentUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
