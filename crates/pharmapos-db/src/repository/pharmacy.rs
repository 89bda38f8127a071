//! # Pharmacy Repository
//!
//! CRUD for pharmacy records. Every stock lot and sale is scoped to a
//! pharmacy, so these rows are the tenancy roots of the schema.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pharmapos_core::Pharmacy;

/// Repository for pharmacy database operations.
#[derive(Debug, Clone)]
pub struct PharmacyRepository {
    pool: SqlitePool,
}

impl PharmacyRepository {
    /// Creates a new PharmacyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PharmacyRepository { pool }
    }

    /// Inserts a pharmacy.
    pub async fn create(&self, pharmacy: &Pharmacy) -> DbResult<()> {
        debug!(id = %pharmacy.id, name = %pharmacy.name, "Creating pharmacy");

        sqlx::query(
            r#"
            INSERT INTO pharmacies (
                id, owner_id, name, address, phone,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&pharmacy.id)
        .bind(&pharmacy.owner_id)
        .bind(&pharmacy.name)
        .bind(&pharmacy.address)
        .bind(&pharmacy.phone)
        .bind(pharmacy.created_at)
        .bind(pharmacy.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a pharmacy by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Pharmacy>> {
        let pharmacy: Option<Pharmacy> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, address, phone,
                   created_at, updated_at
            FROM pharmacies
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pharmacy)
    }

    /// Lists pharmacies belonging to an owner.
    pub async fn list_for_owner(&self, owner_id: &str) -> DbResult<Vec<Pharmacy>> {
        let pharmacies: Vec<Pharmacy> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, address, phone,
                   created_at, updated_at
            FROM pharmacies
            WHERE owner_id = ?1
            ORDER BY name
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pharmacies)
    }

    /// Updates a pharmacy's details.
    pub async fn update(&self, pharmacy: &Pharmacy) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE pharmacies
            SET name = ?1, address = ?2, phone = ?3, updated_at = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&pharmacy.name)
        .bind(&pharmacy.address)
        .bind(&pharmacy.phone)
        .bind(pharmacy.updated_at)
        .bind(&pharmacy.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Pharmacy", &pharmacy.id));
        }

        Ok(())
    }
}

/// Helper to generate a new pharmacy ID.
pub fn generate_pharmacy_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
