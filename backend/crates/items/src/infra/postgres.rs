//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::conversions::sqlstate;
use kernel::id::{ItemId, ShopId, UserId};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::cart::CartLine;
use crate::domain::entity::item::{Item, ItemSummary};
use crate::domain::entity::sale::{Sale, SalesDay};
use crate::domain::entity::stock::{QueuedShipment, Shipment, ShopStockEntry, StockLine};
use crate::domain::repository::{DeleteOutcome, ItemRepository, ItemStore, StockTransaction};
use crate::domain::services::SalesPage;
use crate::error::{ItemError, ItemResult};

/// PostgreSQL-backed item store
#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn delete_outcome(result: Result<sqlx::postgres::PgQueryResult, sqlx::Error>) -> ItemResult<DeleteOutcome> {
    match result {
        Ok(done) if done.rows_affected() == 0 => Ok(DeleteOutcome::NotFound),
        Ok(_) => Ok(DeleteOutcome::Deleted),
        Err(e) if sqlstate::is_foreign_key_violation(&e) => Ok(DeleteOutcome::HasDependents),
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Item Repository Implementation
// ============================================================================

impl ItemRepository for PgItemStore {
    async fn create_item(&self, item: &Item) -> ItemResult<()> {
        sqlx::query("INSERT INTO items (item_id, name, created_at) VALUES ($1, $2, $3)")
            .bind(item.item_id.as_uuid())
            .bind(&item.name)
            .bind(item.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_items(&self) -> ItemResult<Vec<ItemSummary>> {
        let rows = sqlx::query_as::<_, ItemSummaryRow>(
            r#"
            SELECT
                i.item_id,
                i.name,
                (
                    COALESCE((SELECT SUM(s.quantity) FROM shop_stock s WHERE s.item_id = i.item_id), 0)
                    + COALESCE((SELECT SUM(q.quantity) FROM shop_queue q WHERE q.item_id = i.item_id), 0)
                )::BIGINT AS quantity
            FROM items i
            ORDER BY i.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ItemSummaryRow::into_summary).collect())
    }

    async fn delete_item(&self, item_id: &ItemId) -> ItemResult<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM items WHERE item_id = $1")
            .bind(item_id.as_uuid())
            .execute(&self.pool)
            .await;

        delete_outcome(result)
    }

    async fn shop_stock(&self, shop_id: &ShopId) -> ItemResult<Vec<ShopStockEntry>> {
        let rows = sqlx::query_as::<_, ShopStockRow>(
            r#"
            SELECT
                s.item_id,
                i.name,
                s.price,
                s.quantity,
                s.purchase_price,
                COALESCE((
                    SELECT SUM(q.quantity) FROM shop_queue q
                    WHERE q.item_id = s.item_id AND q.shop_id = s.shop_id
                ), 0)::BIGINT AS queued_quantity
            FROM shop_stock s
            JOIN items i ON i.item_id = s.item_id
            WHERE s.shop_id = $1
            ORDER BY i.name
            "#,
        )
        .bind(shop_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ShopStockRow::into_entry).collect())
    }

    async fn delete_stock_line(
        &self,
        item_id: &ItemId,
        shop_id: &ShopId,
    ) -> ItemResult<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM shop_stock WHERE item_id = $1 AND shop_id = $2")
            .bind(item_id.as_uuid())
            .bind(shop_id.as_uuid())
            .execute(&self.pool)
            .await;

        delete_outcome(result)
    }

    async fn cart(&self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT shop_id, user_id, item_id, quantity
            FROM cart_lines
            WHERE shop_id = $1 AND user_id = $2
            ORDER BY item_id
            "#,
        )
        .bind(shop_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CartRow::into_line).collect())
    }

    async fn clear_cart(&self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<u64> {
        let deleted = sqlx::query("DELETE FROM cart_lines WHERE shop_id = $1 AND user_id = $2")
            .bind(shop_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn sales_by_day(&self, page: SalesPage) -> ItemResult<Vec<SalesDay>> {
        let rows = sqlx::query_as::<_, SalesDayRow>(
            r#"
            SELECT
                (created_at AT TIME ZONE 'UTC')::DATE AS date,
                COUNT(*) AS count,
                COALESCE(SUM(income), 0)::BIGINT AS income
            FROM sales
            GROUP BY 1
            ORDER BY 1 DESC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SalesDayRow::into_day).collect())
    }
}

impl ItemStore for PgItemStore {
    type Tx = PgStockTransaction;

    async fn begin(&self) -> ItemResult<PgStockTransaction> {
        Ok(PgStockTransaction {
            tx: self.pool.begin().await?,
        })
    }
}

// ============================================================================
// Stock Transaction Implementation
// ============================================================================

/// Wraps a sqlx transaction, which rolls back when dropped uncommitted.
pub struct PgStockTransaction {
    tx: Transaction<'static, Postgres>,
}

impl StockTransaction for PgStockTransaction {
    async fn item_exists(&mut self, item_id: &ItemId) -> ItemResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM items WHERE item_id = $1)")
                .bind(item_id.as_uuid())
                .fetch_one(&mut *self.tx)
                .await?;

        Ok(exists)
    }

    async fn lock_stock_line(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
    ) -> ItemResult<Option<StockLine>> {
        let row = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT item_id, shop_id, price, quantity, purchase_price
            FROM shop_stock
            WHERE item_id = $1 AND shop_id = $2
            FOR UPDATE
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(shop_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(StockRow::into_line))
    }

    async fn insert_stock_line(&mut self, line: &StockLine) -> ItemResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO shop_stock (item_id, shop_id, price, quantity, purchase_price)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (item_id, shop_id) DO NOTHING
            "#,
        )
        .bind(line.item_id.as_uuid())
        .bind(line.shop_id.as_uuid())
        .bind(line.price)
        .bind(line.quantity)
        .bind(line.purchase_price)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            if sqlstate::is_foreign_key_violation(&e) {
                ItemError::ItemNotFound
            } else {
                e.into()
            }
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn save_stock_line(&mut self, line: &StockLine) -> ItemResult<()> {
        sqlx::query(
            r#"
            UPDATE shop_stock SET
                price = $3,
                quantity = $4,
                purchase_price = $5
            WHERE item_id = $1 AND shop_id = $2
            "#,
        )
        .bind(line.item_id.as_uuid())
        .bind(line.shop_id.as_uuid())
        .bind(line.price)
        .bind(line.quantity)
        .bind(line.purchase_price)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn enqueue(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
        shipment: &Shipment,
    ) -> ItemResult<i64> {
        let queue_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO shop_queue (item_id, shop_id, price, quantity, purchase_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING queue_id
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(shop_id.as_uuid())
        .bind(shipment.price)
        .bind(shipment.quantity)
        .bind(shipment.purchase_price)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(queue_id)
    }

    async fn oldest_queued(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
    ) -> ItemResult<Option<QueuedShipment>> {
        let row = sqlx::query_as::<_, QueueRow>(
            r#"
            SELECT queue_id, item_id, shop_id, price, quantity, purchase_price, created_at
            FROM shop_queue
            WHERE item_id = $1 AND shop_id = $2
            ORDER BY queue_id
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(shop_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(QueueRow::into_queued))
    }

    async fn remove_queued(&mut self, queue_id: i64) -> ItemResult<()> {
        sqlx::query("DELETE FROM shop_queue WHERE queue_id = $1")
            .bind(queue_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn cart_line(
        &mut self,
        shop_id: &ShopId,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> ItemResult<Option<CartLine>> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT shop_id, user_id, item_id, quantity
            FROM cart_lines
            WHERE shop_id = $1 AND user_id = $2 AND item_id = $3
            FOR UPDATE
            "#,
        )
        .bind(shop_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(item_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(CartRow::into_line))
    }

    async fn cart_lines(
        &mut self,
        shop_id: &ShopId,
        user_id: &UserId,
    ) -> ItemResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT shop_id, user_id, item_id, quantity
            FROM cart_lines
            WHERE shop_id = $1 AND user_id = $2
            ORDER BY item_id
            FOR UPDATE
            "#,
        )
        .bind(shop_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(rows.into_iter().map(CartRow::into_line).collect())
    }

    async fn save_cart_line(&mut self, line: &CartLine) -> ItemResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_lines (shop_id, user_id, item_id, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (shop_id, user_id, item_id)
            DO UPDATE SET quantity = EXCLUDED.quantity
            "#,
        )
        .bind(line.shop_id.as_uuid())
        .bind(line.user_id.as_uuid())
        .bind(line.item_id.as_uuid())
        .bind(line.quantity)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn delete_cart_line(
        &mut self,
        shop_id: &ShopId,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> ItemResult<()> {
        sqlx::query(
            "DELETE FROM cart_lines WHERE shop_id = $1 AND user_id = $2 AND item_id = $3",
        )
        .bind(shop_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(item_id.as_uuid())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn clear_cart(&mut self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<()> {
        sqlx::query("DELETE FROM cart_lines WHERE shop_id = $1 AND user_id = $2")
            .bind(shop_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn insert_sale(&mut self, sale: &Sale) -> ItemResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sales (
                sale_id,
                item_id,
                user_id,
                shop_id,
                price,
                quantity,
                income,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(sale.sale_id)
        .bind(sale.item_id.as_uuid())
        .bind(sale.user_id.as_uuid())
        .bind(sale.shop_id.as_uuid())
        .bind(sale.price)
        .bind(sale.quantity)
        .bind(sale.income)
        .bind(sale.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self) -> ItemResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ItemSummaryRow {
    item_id: Uuid,
    name: String,
    quantity: i64,
}

impl ItemSummaryRow {
    fn into_summary(self) -> ItemSummary {
        ItemSummary {
            item_id: ItemId::from_uuid(self.item_id),
            name: self.name,
            quantity: self.quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StockRow {
    item_id: Uuid,
    shop_id: Uuid,
    price: i32,
    quantity: i32,
    purchase_price: i32,
}

impl StockRow {
    fn into_line(self) -> StockLine {
        StockLine {
            item_id: ItemId::from_uuid(self.item_id),
            shop_id: ShopId::from_uuid(self.shop_id),
            price: self.price,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ShopStockRow {
    item_id: Uuid,
    name: String,
    price: i32,
    quantity: i32,
    purchase_price: i32,
    queued_quantity: i64,
}

impl ShopStockRow {
    fn into_entry(self) -> ShopStockEntry {
        ShopStockEntry {
            item_id: ItemId::from_uuid(self.item_id),
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            queued_quantity: self.queued_quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QueueRow {
    queue_id: i64,
    item_id: Uuid,
    shop_id: Uuid,
    price: i32,
    quantity: i32,
    purchase_price: i32,
    created_at: DateTime<Utc>,
}

impl QueueRow {
    fn into_queued(self) -> QueuedShipment {
        QueuedShipment {
            queue_id: self.queue_id,
            item_id: ItemId::from_uuid(self.item_id),
            shop_id: ShopId::from_uuid(self.shop_id),
            shipment: Shipment {
                price: self.price,
                quantity: self.quantity,
                purchase_price: self.purchase_price,
            },
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CartRow {
    shop_id: Uuid,
    user_id: Uuid,
    item_id: Uuid,
    quantity: i32,
}

impl CartRow {
    fn into_line(self) -> CartLine {
        CartLine {
            shop_id: ShopId::from_uuid(self.shop_id),
            user_id: UserId::from_uuid(self.user_id),
            item_id: ItemId::from_uuid(self.item_id),
            quantity: self.quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SalesDayRow {
    date: NaiveDate,
    count: i64,
    income: i64,
}

impl SalesDayRow {
    fn into_day(self) -> SalesDay {
        SalesDay {
            date: self.date,
            count: self.count,
            income: self.income,
        }
    }
}
