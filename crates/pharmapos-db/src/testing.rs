//! Shared fixtures for the repository and checkout tests.
//!
//! Every test gets a fresh in-memory database with one user and one
//! pharmacy already in place; stock lots are added per test.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::checkout::AuthContext;
use crate::pool::{Database, DbConfig};
use pharmapos_core::{InventoryRecord, Pharmacy, User};

/// IDs of the baseline rows seeded by [`fixtures`].
pub struct Fixtures {
    pub pharmacy_id: String,
    pub user_id: String,
}

impl Fixtures {
    pub fn auth(&self) -> AuthContext {
        AuthContext {
            pharmacy_id: self.pharmacy_id.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

/// Fresh in-memory database with migrations applied.
pub async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// Seeds one owner and one pharmacy.
pub async fn fixtures(db: &Database) -> Fixtures {
    let now = Utc::now();
    let user_id = Uuid::new_v4().to_string();
    let pharmacy_id = Uuid::new_v4().to_string();

    db.users()
        .insert(&User {
            id: user_id.clone(),
            name: "Test Owner".to_string(),
            email: format!("{user_id}@example.com"),
            role: "owner".to_string(),
            created_at: now,
        })
        .await
        .unwrap();

    db.pharmacies()
        .create(&Pharmacy {
            id: pharmacy_id.clone(),
            owner_id: user_id.clone(),
            name: "Test Pharmacy".to_string(),
            address: None,
            phone: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

    Fixtures {
        pharmacy_id,
        user_id,
    }
}

/// Adds a stock lot with the given quantity and unit sale price, and
/// returns its id.
pub async fn stock_lot(db: &Database, fx: &Fixtures, quantity: i64, unit_sale_cents: i64) -> String {
    stock_lot_expiring(db, fx, quantity, unit_sale_cents, None).await
}

/// Adds a stock lot with an explicit expiry date.
pub async fn stock_lot_expiring(
    db: &Database,
    fx: &Fixtures,
    quantity: i64,
    unit_sale_cents: i64,
    expiry_date: Option<NaiveDate>,
) -> String {
    let now = Utc::now();
    let id = Uuid::new_v4().to_string();

    db.inventory()
        .add_record(&InventoryRecord {
            id: id.clone(),
            pharmacy_id: fx.pharmacy_id.clone(),
            medicine_id: None,
            quantity,
            unit_cost_cents: unit_sale_cents / 2,
            unit_sale_cents,
            expiry_date,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

    id
}
