//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{ShopId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::shop::Shop;
use crate::domain::repository::ShopRepository;
use crate::error::ShopResult;

#[derive(Clone)]
pub struct PgShopRepository {
    pool: PgPool,
}

impl PgShopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ShopRepository for PgShopRepository {
    async fn create_with_access(&self, shop: &Shop, creator: &UserId) -> ShopResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO shops (shop_id, city, address, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(shop.shop_id.as_uuid())
        .bind(&shop.city)
        .bind(&shop.address)
        .bind(shop.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO shop_access (shop_id, user_id) VALUES ($1, $2)")
            .bind(shop.shop_id.as_uuid())
            .bind(creator.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list(&self) -> ShopResult<Vec<Shop>> {
        let rows = sqlx::query_as::<_, ShopRow>(
            r#"
            SELECT shop_id, city, address, created_at
            FROM shops
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ShopRow::into_shop).collect())
    }
}

#[derive(sqlx::FromRow)]
struct ShopRow {
    shop_id: Uuid,
    city: String,
    address: String,
    created_at: DateTime<Utc>,
}

impl ShopRow {
    fn into_shop(self) -> Shop {
        Shop {
            shop_id: ShopId::from_uuid(self.shop_id),
            city: self.city,
            address: self.address,
            created_at: self.created_at,
        }
    }
}
