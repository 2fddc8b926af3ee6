//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::sqlstate;
use kernel::id::{ShopId, UserId};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::{GrantOutcome, ShopAccessRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn email_taken_or(err: sqlx::Error) -> AuthError {
    if sqlstate::is_unique_violation(&err) {
        AuthError::EmailTaken
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                user_role,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.user_role.code())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(email_taken_or)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                user_role,
                created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                user_role,
                created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                password_hash = $3,
                user_role = $4
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.user_role.code())
        .execute(&self.pool)
        .await
        .map_err(email_taken_or)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn count(&self) -> AuthResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// ============================================================================
// Shop Access Repository Implementation
// ============================================================================

impl ShopAccessRepository for PgAuthRepository {
    async fn has_access(&self, user_id: &UserId, shop_id: &ShopId) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM shop_access
                WHERE user_id = $1 AND shop_id = $2
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(shop_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn shop_ids_for(&self, user_id: &UserId) -> AuthResult<Vec<ShopId>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT shop_id FROM shop_access
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(ShopId::from_uuid).collect())
    }

    async fn grant(&self, shop_id: &ShopId, user_id: &UserId) -> AuthResult<GrantOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO shop_access (shop_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (shop_id, user_id) DO NOTHING
            "#,
        )
        .bind(shop_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(GrantOutcome::AlreadyGranted),
            Ok(_) => Ok(GrantOutcome::Granted),
            Err(e) if sqlstate::is_foreign_key_violation(&e) => Ok(GrantOutcome::MissingParty),
            Err(e) => Err(e.into()),
        }
    }

    async fn revoke(&self, shop_id: &ShopId, user_id: &UserId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM shop_access WHERE shop_id = $1 AND user_id = $2")
            .bind(shop_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    user_role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        let user_role = UserRole::from_code(&self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            user_role,
            created_at: self.created_at,
        })
    }
}
