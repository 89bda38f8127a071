//! # Sale Repository
//!
//! Persistence for sale headers and their line items. The writes take
//! a `&mut SqliteConnection` so they run on the sale engine's
//! transaction; the reads are plain pool queries.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use pharmapos_core::{Sale, SaleItem};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale header on the given transaction connection.
    pub async fn insert_sale(&self, conn: &mut SqliteConnection, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, total_cents = %sale.total_cents, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, pharmacy_id, user_id,
                total_cents, discount_cents, round_off_cents,
                paid_cents, due_cents, change_cents,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.pharmacy_id)
        .bind(&sale.user_id)
        .bind(sale.total_cents)
        .bind(sale.discount_cents)
        .bind(sale.round_off_cents)
        .bind(sale.paid_cents)
        .bind(sale.due_cents)
        .bind(sale.change_cents)
        .bind(sale.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Inserts one sale line item on the given transaction connection.
    pub async fn insert_item(&self, conn: &mut SqliteConnection, item: &SaleItem) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sale_items (
                id, sale_id, medicine_id, inventory_id,
                quantity, unit_price_cents, subtotal_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sale_id)
        .bind(&item.medicine_id)
        .bind(&item.inventory_id)
        .bind(item.quantity)
        .bind(item.unit_price_cents)
        .bind(item.subtotal_cents)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Gets a sale header by ID, scoped to its pharmacy.
    pub async fn get_by_id(&self, pharmacy_id: &str, id: &str) -> DbResult<Option<Sale>> {
        let sale: Option<Sale> = sqlx::query_as(
            r#"
            SELECT id, pharmacy_id, user_id,
                   total_cents, discount_cents, round_off_cents,
                   paid_cents, due_cents, change_cents,
                   created_at
            FROM sales
            WHERE id = ?1 AND pharmacy_id = ?2
            "#,
        )
        .bind(id)
        .bind(pharmacy_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets the line items for a sale, in insertion order.
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items: Vec<SaleItem> = sqlx::query_as(
            r#"
            SELECT id, sale_id, medicine_id, inventory_id,
                   quantity, unit_price_cents, subtotal_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a pharmacy's sales, newest first.
    pub async fn list_for_pharmacy(&self, pharmacy_id: &str, limit: i64) -> DbResult<Vec<Sale>> {
        let sales: Vec<Sale> = sqlx::query_as(
            r#"
            SELECT id, pharmacy_id, user_id,
                   total_cents, discount_cents, round_off_cents,
                   paid_cents, due_cents, change_cents,
                   created_at
            FROM sales
            WHERE pharmacy_id = ?1
            ORDER BY created_at DESC
            LIMIT ?2
            "#,
        )
        .bind(pharmacy_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

/// Helper to generate a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new sale item ID.
pub fn generate_sale_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use chrono::Utc;

    fn sample_sale(fx: &testing::Fixtures) -> Sale {
        Sale {
            id: generate_sale_id(),
            pharmacy_id: fx.pharmacy_id.clone(),
            user_id: fx.user_id.clone(),
            total_cents: 500,
            discount_cents: 50,
            round_off_cents: 0,
            paid_cents: 450,
            due_cents: 0,
            change_cents: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_sale() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        let sale = sample_sale(&fx);

        let mut tx = db.pool().begin().await.unwrap();
        db.sales().insert_sale(&mut tx, &sale).await.unwrap();
        tx.commit().await.unwrap();

        let found = db.sales().get_by_id(&fx.pharmacy_id, &sale.id).await.unwrap().unwrap();
        assert_eq!(found.total_cents, 500);
        assert_eq!(found.discount_cents, 50);
        assert_eq!(found.net_payable().cents(), 450);
    }

    #[tokio::test]
    async fn test_get_sale_wrong_pharmacy_returns_none() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        let sale = sample_sale(&fx);

        let mut tx = db.pool().begin().await.unwrap();
        db.sales().insert_sale(&mut tx, &sale).await.unwrap();
        tx.commit().await.unwrap();

        let found = db.sales().get_by_id("other-pharmacy", &sale.id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_items_preserve_insertion_order() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        let inv = testing::stock_lot(&db, &fx, 10, 100).await;
        let sale = sample_sale(&fx);

        let mut tx = db.pool().begin().await.unwrap();
        db.sales().insert_sale(&mut tx, &sale).await.unwrap();
        for qty in [2, 1, 3] {
            let item = SaleItem {
                id: generate_sale_item_id(),
                sale_id: sale.id.clone(),
                medicine_id: None,
                inventory_id: inv.clone(),
                quantity: qty,
                unit_price_cents: 100,
                subtotal_cents: qty * 100,
            };
            db.sales().insert_item(&mut tx, &item).await.unwrap();
        }
        tx.commit().await.unwrap();

        let items = db.sales().get_items(&sale.id).await.unwrap();
        let quantities: Vec<i64> = items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_list_for_pharmacy_newest_first() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;

        let mut older = sample_sale(&fx);
        older.created_at = Utc::now() - chrono::Duration::minutes(5);
        let newer = sample_sale(&fx);

        let mut tx = db.pool().begin().await.unwrap();
        db.sales().insert_sale(&mut tx, &older).await.unwrap();
        db.sales().insert_sale(&mut tx, &newer).await.unwrap();
        tx.commit().await.unwrap();

        let sales = db.sales().list_for_pharmacy(&fx.pharmacy_id, 10).await.unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].id, newer.id);
    }
}
