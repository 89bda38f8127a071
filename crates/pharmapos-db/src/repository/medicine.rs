//! # Medicine Repository
//!
//! Catalog of medicines (brand name, generic name, form, strength).
//! Catalog rows describe a product; stock levels live in `inventory`.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pharmapos_core::Medicine;

/// Repository for medicine catalog operations.
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Inserts a catalog entry.
    pub async fn insert(&self, medicine: &Medicine) -> DbResult<()> {
        debug!(id = %medicine.id, brand = %medicine.brand_name, "Inserting medicine");

        sqlx::query(
            r#"
            INSERT INTO medicines (
                id, brand_name, generic_name, manufacturer, form, strength,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&medicine.id)
        .bind(&medicine.brand_name)
        .bind(&medicine.generic_name)
        .bind(&medicine.manufacturer)
        .bind(&medicine.form)
        .bind(&medicine.strength)
        .bind(medicine.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a medicine by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Medicine>> {
        let medicine: Option<Medicine> = sqlx::query_as(
            r#"
            SELECT id, brand_name, generic_name, manufacturer, form, strength,
                   created_at
            FROM medicines
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(medicine)
    }

    /// Searches by brand or generic name prefix, case-insensitive.
    pub async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<Medicine>> {
        let pattern = format!("{}%", query);

        let medicines: Vec<Medicine> = sqlx::query_as(
            r#"
            SELECT id, brand_name, generic_name, manufacturer, form, strength,
                   created_at
            FROM medicines
            WHERE brand_name LIKE ?1 COLLATE NOCASE
               OR generic_name LIKE ?1 COLLATE NOCASE
            ORDER BY brand_name
            LIMIT ?2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    /// Updates a catalog entry.
    pub async fn update(&self, medicine: &Medicine) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE medicines
            SET brand_name = ?1, generic_name = ?2, manufacturer = ?3,
                form = ?4, strength = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&medicine.brand_name)
        .bind(&medicine.generic_name)
        .bind(&medicine.manufacturer)
        .bind(&medicine.form)
        .bind(&medicine.strength)
        .bind(&medicine.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", &medicine.id));
        }

        Ok(())
    }
}

/// Helper to generate a new medicine ID.
pub fn generate_medicine_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
