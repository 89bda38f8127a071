//! # Report Repository
//!
//! Read-only sales aggregates: revenue and sale counts for a day, a
//! month, or an arbitrary date range.
//!
//! Revenue is `SUM(total_cents - discount_cents + round_off_cents)`,
//! i.e. what customers actually owed, not what they have paid so far.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::DbResult;

/// Aggregated sales figures for one reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SalesSummary {
    /// Number of sales in the window.
    pub sale_count: i64,
    /// Pre-discount gross, in cents.
    pub gross_cents: i64,
    /// Discount given, in cents.
    pub discount_cents: i64,
    /// Net revenue owed, in cents.
    pub revenue_cents: i64,
    /// Outstanding customer dues, in cents.
    pub due_cents: i64,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    sale_count: i64,
    gross_cents: Option<i64>,
    discount_cents: Option<i64>,
    revenue_cents: Option<i64>,
    due_cents: Option<i64>,
}

impl From<SummaryRow> for SalesSummary {
    fn from(row: SummaryRow) -> Self {
        // SUM over zero rows is NULL in SQLite.
        SalesSummary {
            sale_count: row.sale_count,
            gross_cents: row.gross_cents.unwrap_or(0),
            discount_cents: row.discount_cents.unwrap_or(0),
            revenue_cents: row.revenue_cents.unwrap_or(0),
            due_cents: row.due_cents.unwrap_or(0),
        }
    }
}

/// Repository for sales reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Summary for a half-open date range `[from, to)`.
    ///
    /// Timestamps are stored as RFC3339 UTC text, so a lexicographic
    /// comparison against `YYYY-MM-DD` bounds is a correct date filter.
    pub async fn range_summary(
        &self,
        pharmacy_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<SalesSummary> {
        let row: SummaryRow = sqlx::query_as(
            r#"
            SELECT COUNT(*) AS sale_count,
                   SUM(total_cents) AS gross_cents,
                   SUM(discount_cents) AS discount_cents,
                   SUM(total_cents - discount_cents + round_off_cents) AS revenue_cents,
                   SUM(due_cents) AS due_cents
            FROM sales
            WHERE pharmacy_id = ?1
              AND created_at >= ?2
              AND created_at < ?3
            "#,
        )
        .bind(pharmacy_id)
        .bind(from.format("%Y-%m-%d").to_string())
        .bind(to.format("%Y-%m-%d").to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Summary for a single calendar day (UTC).
    pub async fn daily_summary(&self, pharmacy_id: &str, day: NaiveDate) -> DbResult<SalesSummary> {
        self.range_summary(pharmacy_id, day, day + chrono::Duration::days(1))
            .await
    }

    /// Summary for a calendar month (UTC).
    pub async fn monthly_summary(
        &self,
        pharmacy_id: &str,
        year: i32,
        month: u32,
    ) -> DbResult<SalesSummary> {
        // First of this month through first of the next.
        let from = NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default());
        let to = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .unwrap_or(from);

        self.range_summary(pharmacy_id, from, to).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::sale::generate_sale_id;
    use crate::testing;
    use chrono::{Datelike, Duration, Utc};
    use pharmapos_core::Sale;

    async fn record_sale(db: &crate::Database, fx: &testing::Fixtures, total: i64, discount: i64) {
        let sale = Sale {
            id: generate_sale_id(),
            pharmacy_id: fx.pharmacy_id.clone(),
            user_id: fx.user_id.clone(),
            total_cents: total,
            discount_cents: discount,
            paid_cents: total - discount,
            due_cents: 0,
            round_off_cents: 0,
            change_cents: 0,
            created_at: Utc::now(),
        };
        let mut tx = db.pool().begin().await.unwrap();
        db.sales().insert_sale(&mut tx, &sale).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_daily_summary_aggregates_today() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        record_sale(&db, &fx, 1000, 100).await;
        record_sale(&db, &fx, 500, 0).await;

        let today = Utc::now().date_naive();
        let summary = db.reports().daily_summary(&fx.pharmacy_id, today).await.unwrap();

        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.gross_cents, 1500);
        assert_eq!(summary.discount_cents, 100);
        assert_eq!(summary.revenue_cents, 1400);
    }

    #[tokio::test]
    async fn test_empty_window_is_all_zeros() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        record_sale(&db, &fx, 1000, 0).await;

        let long_ago = Utc::now().date_naive() - Duration::days(365);
        let summary = db
            .reports()
            .range_summary(&fx.pharmacy_id, long_ago, long_ago + Duration::days(1))
            .await
            .unwrap();

        assert_eq!(summary.sale_count, 0);
        assert_eq!(summary.revenue_cents, 0);
    }

    #[tokio::test]
    async fn test_summary_scoped_to_pharmacy() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        record_sale(&db, &fx, 1000, 0).await;

        let today = Utc::now().date_naive();
        let summary = db.reports().daily_summary("other-pharmacy", today).await.unwrap();
        assert_eq!(summary.sale_count, 0);
    }

    #[tokio::test]
    async fn test_monthly_summary_window() {
        let db = testing::test_db().await;
        let fx = testing::fixtures(&db).await;
        record_sale(&db, &fx, 700, 70).await;

        let now = Utc::now().date_naive();
        let summary = db
            .reports()
            .monthly_summary(&fx.pharmacy_id, now.year(), now.month())
            .await
            .unwrap();
        assert_eq!(summary.sale_count, 1);
        assert_eq!(summary.revenue_cents, 630);
    }
}
