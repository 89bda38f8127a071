//! # Inventory Repository
//!
//! Database operations for per-pharmacy stock lots, including the
//! reservation primitive used by the sale engine.
//!
//! ## Reservation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Check-Then-Decrement, Done Right                        │
//! │                                                                         │
//! │  ❌ WRONG: split read and write (oversells under concurrency)          │
//! │     SELECT quantity FROM inventory WHERE id = ?   -- "10 available"    │
//! │     ... another sale decrements 8 here ...                             │
//! │     UPDATE inventory SET quantity = 10 - 6        -- stock corrupted   │
//! │                                                                         │
//! │  ✅ CORRECT: one conditional mutation                                   │
//! │     UPDATE inventory SET quantity = quantity - 6                        │
//! │     WHERE id = ? AND quantity >= 6                                      │
//! │     -- rows_affected = 0 means insufficient stock, nothing changed     │
//! │                                                                         │
//! │  The decrement runs on the enclosing sale transaction's connection,    │
//! │  so an abort rolls every reservation back as one unit.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pharmapos_core::InventoryRecord;

/// Price/medicine snapshot captured at reservation time.
///
/// The unit price frozen here is what sale items record, even if the
/// inventory row is repriced later.
#[derive(Debug, Clone)]
pub struct StockSnapshot {
    pub inventory_id: String,
    pub medicine_id: Option<String>,
    pub unit_sale_cents: i64,
    /// Quantity on hand before this reservation's decrement.
    pub quantity_before: i64,
}

/// Outcome of a reservation attempt. Distinguishes the two rejection
/// cases the caller reports differently.
#[derive(Debug, Clone)]
pub enum ReserveOutcome {
    /// Stock decremented; snapshot captured in the same atomic step.
    Reserved(StockSnapshot),
    /// No such row for this pharmacy (missing or foreign).
    NotFound,
    /// Conditional decrement matched no row: not enough stock.
    InsufficientStock { available: i64 },
}

#[derive(sqlx::FromRow)]
struct InventoryProbe {
    medicine_id: Option<String>,
    quantity: i64,
    unit_sale_cents: i64,
}

/// A stock lot joined with its catalog names, for counter search.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct StockSearchRow {
    pub inventory_id: String,
    pub medicine_id: Option<String>,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub quantity: i64,
    pub unit_sale_cents: i64,
}

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Reserves stock: verifies availability and decrements in a
    /// single conditional mutation.
    ///
    /// Runs on the caller's connection so it joins the enclosing sale
    /// transaction; never call it on a bare pool connection from the
    /// sale path.
    ///
    /// ## Arguments
    /// * `conn` - Connection of the enclosing transaction
    /// * `pharmacy_id` - Owning pharmacy (scopes the lookup)
    /// * `inventory_id` - Stock lot to draw from
    /// * `quantity` - Aggregated units requested across all lines
    ///
    /// ## Returns
    /// * `Reserved(snapshot)` - decrement applied, price captured
    /// * `NotFound` - row missing or owned by another pharmacy
    /// * `InsufficientStock` - available stock below the request;
    ///   nothing changed
    pub async fn reserve(
        &self,
        conn: &mut SqliteConnection,
        pharmacy_id: &str,
        inventory_id: &str,
        quantity: i64,
    ) -> DbResult<ReserveOutcome> {
        debug!(inventory_id = %inventory_id, quantity = %quantity, "Reserving stock");

        // Snapshot price and availability on the transaction connection.
        // The conditional UPDATE below is what makes the check atomic;
        // this read only supplies the price and the error detail.
        let probe: Option<InventoryProbe> = sqlx::query_as(
            r#"
            SELECT medicine_id, quantity, unit_sale_cents
            FROM inventory
            WHERE id = ?1 AND pharmacy_id = ?2
            "#,
        )
        .bind(inventory_id)
        .bind(pharmacy_id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(probe) = probe else {
            return Ok(ReserveOutcome::NotFound);
        };

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET quantity = quantity - ?1, updated_at = ?2
            WHERE id = ?3 AND pharmacy_id = ?4 AND quantity >= ?1
            "#,
        )
        .bind(quantity)
        .bind(now)
        .bind(inventory_id)
        .bind(pharmacy_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(ReserveOutcome::InsufficientStock {
                available: probe.quantity,
            });
        }

        Ok(ReserveOutcome::Reserved(StockSnapshot {
            inventory_id: inventory_id.to_string(),
            medicine_id: probe.medicine_id,
            unit_sale_cents: probe.unit_sale_cents,
            quantity_before: probe.quantity,
        }))
    }

    /// Gets an inventory record scoped to its pharmacy.
    pub async fn get(&self, pharmacy_id: &str, id: &str) -> DbResult<Option<InventoryRecord>> {
        let record: Option<InventoryRecord> = sqlx::query_as(
            r#"
            SELECT id, pharmacy_id, medicine_id, quantity,
                   unit_cost_cents, unit_sale_cents, expiry_date,
                   created_at, updated_at
            FROM inventory
            WHERE id = ?1 AND pharmacy_id = ?2
            "#,
        )
        .bind(id)
        .bind(pharmacy_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Inserts a new stock lot.
    pub async fn add_record(&self, record: &InventoryRecord) -> DbResult<()> {
        debug!(id = %record.id, pharmacy_id = %record.pharmacy_id, "Inserting inventory record");

        sqlx::query(
            r#"
            INSERT INTO inventory (
                id, pharmacy_id, medicine_id, quantity,
                unit_cost_cents, unit_sale_cents, expiry_date,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&record.id)
        .bind(&record.pharmacy_id)
        .bind(&record.medicine_id)
        .bind(record.quantity)
        .bind(record.unit_cost_cents)
        .bind(record.unit_sale_cents)
        .bind(record.expiry_date)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates prices and expiry of an existing lot. Quantity is not
    /// touched here; use `restock` or the sale path for that.
    pub async fn update_record(
        &self,
        pharmacy_id: &str,
        id: &str,
        unit_cost_cents: i64,
        unit_sale_cents: i64,
        expiry_date: Option<NaiveDate>,
    ) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET unit_cost_cents = ?1, unit_sale_cents = ?2,
                expiry_date = ?3, updated_at = ?4
            WHERE id = ?5 AND pharmacy_id = ?6
            "#,
        )
        .bind(unit_cost_cents)
        .bind(unit_sale_cents)
        .bind(expiry_date)
        .bind(now)
        .bind(id)
        .bind(pharmacy_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory", id));
        }

        Ok(())
    }

    /// Adds stock to an existing lot (stock-in).
    ///
    /// Delta update, not an absolute write, so it composes with
    /// concurrent sale decrements.
    pub async fn restock(&self, pharmacy_id: &str, id: &str, quantity: i64) -> DbResult<()> {
        debug!(id = %id, quantity = %quantity, "Restocking");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET quantity = quantity + ?1, updated_at = ?2
            WHERE id = ?3 AND pharmacy_id = ?4
            "#,
        )
        .bind(quantity)
        .bind(now)
        .bind(id)
        .bind(pharmacy_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory", id));
        }

        Ok(())
    }

    /// Lists all stock lots for a pharmacy.
    pub async fn list_for_pharmacy(&self, pharmacy_id: &str) -> DbResult<Vec<InventoryRecord>> {
        let records: Vec<InventoryRecord> = sqlx::query_as(
            r#"
            SELECT id, pharmacy_id, medicine_id, quantity,
                   unit_cost_cents, unit_sale_cents, expiry_date,
                   created_at, updated_at
            FROM inventory
            WHERE pharmacy_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(pharmacy_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Searches a pharmacy's stock by catalog name prefix, for the
    /// counter search box. Only in-stock lots are returned.
    pub async fn search_stock(
        &self,
        pharmacy_id: &str,
        query: &str,
        limit: i64,
    ) -> DbResult<Vec<StockSearchRow>> {
        let pattern = format!("{}%", query);

        let rows: Vec<StockSearchRow> = sqlx::query_as(
            r#"
            SELECT i.id AS inventory_id, i.medicine_id,
                   m.brand_name, m.generic_name,
                   i.quantity, i.unit_sale_cents
            FROM inventory i
            JOIN medicines m ON m.id = i.medicine_id
            WHERE i.pharmacy_id = ?1
              AND i.quantity > 0
              AND (m.brand_name LIKE ?2 COLLATE NOCASE
                   OR m.generic_name LIKE ?2 COLLATE NOCASE)
            ORDER BY m.brand_name
            LIMIT ?3
            "#,
        )
        .bind(pharmacy_id)
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists lots expiring within the next `days` days (inclusive),
    /// soonest first. Lots without an expiry date are skipped.
    pub async fn expiring_within(
        &self,
        pharmacy_id: &str,
        days: i64,
    ) -> DbResult<Vec<InventoryRecord>> {
        let cutoff = Utc::now().date_naive() + Duration::days(days);

        let records: Vec<InventoryRecord> = sqlx::query_as(
            r#"
            SELECT id, pharmacy_id, medicine_id, quantity,
                   unit_cost_cents, unit_sale_cents, expiry_date,
                   created_at, updated_at
            FROM inventory
            WHERE pharmacy_id = ?1
              AND expiry_date IS NOT NULL
              AND expiry_date <= ?2
            ORDER BY expiry_date
            "#,
        )
        .bind(pharmacy_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

/// Helper to generate a new inventory record ID.
pub fn generate_inventory_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn test_reserve_decrements_and_snapshots_price() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        let inv = testing::stock_lot(&db, &fx, 10, 100).await;

        let mut tx = db.pool().begin().await.unwrap();
        let outcome = db
            .inventory()
            .reserve(&mut tx, &fx.pharmacy_id, &inv, 3)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        match outcome {
            ReserveOutcome::Reserved(snap) => {
                assert_eq!(snap.unit_sale_cents, 100);
                assert_eq!(snap.quantity_before, 10);
            }
            other => panic!("expected Reserved, got {other:?}"),
        }

        let record = db.inventory().get(&fx.pharmacy_id, &inv).await.unwrap().unwrap();
        assert_eq!(record.quantity, 7);
    }

    #[tokio::test]
    async fn test_reserve_insufficient_leaves_stock_untouched() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        let inv = testing::stock_lot(&db, &fx, 5, 250).await;

        let mut tx = db.pool().begin().await.unwrap();
        let outcome = db
            .inventory()
            .reserve(&mut tx, &fx.pharmacy_id, &inv, 6)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        match outcome {
            ReserveOutcome::InsufficientStock { available } => assert_eq!(available, 5),
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        let record = db.inventory().get(&fx.pharmacy_id, &inv).await.unwrap().unwrap();
        assert_eq!(record.quantity, 5);
    }

    #[tokio::test]
    async fn test_reserve_wrong_pharmacy_is_not_found() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        let inv = testing::stock_lot(&db, &fx, 5, 250).await;

        let mut tx = db.pool().begin().await.unwrap();
        let outcome = db
            .inventory()
            .reserve(&mut tx, "other-pharmacy", &inv, 1)
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert!(matches!(outcome, ReserveOutcome::NotFound));
    }

    #[tokio::test]
    async fn test_restock_adds_quantity() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        let inv = testing::stock_lot(&db, &fx, 5, 250).await;

        db.inventory().restock(&fx.pharmacy_id, &inv, 20).await.unwrap();

        let record = db.inventory().get(&fx.pharmacy_id, &inv).await.unwrap().unwrap();
        assert_eq!(record.quantity, 25);
    }

    #[tokio::test]
    async fn test_restock_missing_record_is_not_found() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;

        let err = db
            .inventory()
            .restock(&fx.pharmacy_id, "no-such-id", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search_stock_joins_catalog_and_skips_empty_lots() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        let now = Utc::now();

        let medicine = pharmapos_core::Medicine {
            id: "med-1".to_string(),
            brand_name: "Panadol".to_string(),
            generic_name: "Paracetamol".to_string(),
            manufacturer: None,
            form: Some("tablet".to_string()),
            strength: Some("500mg".to_string()),
            created_at: now,
        };
        db.medicines().insert(&medicine).await.unwrap();

        for (id, qty) in [("lot-stocked", 8), ("lot-empty", 0)] {
            db.inventory()
                .add_record(&InventoryRecord {
                    id: id.to_string(),
                    pharmacy_id: fx.pharmacy_id.clone(),
                    medicine_id: Some(medicine.id.clone()),
                    quantity: qty,
                    unit_cost_cents: 60,
                    unit_sale_cents: 100,
                    expiry_date: None,
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }

        let hits = db
            .inventory()
            .search_stock(&fx.pharmacy_id, "para", 10)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].inventory_id, "lot-stocked");
        assert_eq!(hits[0].brand_name.as_deref(), Some("Panadol"));
    }

    #[tokio::test]
    async fn test_expiring_within_filters_and_sorts() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;

        let today = Utc::now().date_naive();
        let soon = testing::stock_lot_expiring(&db, &fx, 5, 100, Some(today + Duration::days(3))).await;
        let sooner = testing::stock_lot_expiring(&db, &fx, 5, 100, Some(today + Duration::days(1))).await;
        let _far = testing::stock_lot_expiring(&db, &fx, 5, 100, Some(today + Duration::days(90))).await;
        let _never = testing::stock_lot_expiring(&db, &fx, 5, 100, None).await;

        let alerts = db.inventory().expiring_within(&fx.pharmacy_id, 30).await.unwrap();
        let ids: Vec<&str> = alerts.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![sooner.as_str(), soon.as_str()]);
    }
}
