//! # pharmapos-db: SQLite Persistence for PharmaPOS
//!
//! Database layer for the pharmacy point-of-sale backend: connection
//! pooling, embedded migrations, repositories, and the sale engine
//! that ties them together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PharmaPOS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Callers (HTTP layer, external)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                pharmapos-core (Business Logic)                  │   │
//! │  │            pure pricing, validation, domain types               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ pharmapos-db (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   pool   │  │ repository │  │  checkout  │  │migrations│  │   │
//! │  │   │ Database │  │ Inventory  │  │ SaleEngine │  │ embedded │  │   │
//! │  │   │ DbConfig │  │ Sale, ...  │  │  Receipt   │  │  *.sql   │  │   │
//! │  │   └──────────┘  └────────────┘  └────────────┘  └──────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │                         ┌──────▼──────┐                                │
//! │                         │   SQLite    │  WAL, foreign keys,            │
//! │                         │  (1 file)   │  busy timeout                  │
//! │                         └─────────────┘                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Database connection management ([`Database`], [`DbConfig`])
//! - [`repository`] - One repository per aggregate
//! - [`checkout`] - The atomic sale transaction ([`checkout::SaleEngine`])
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Database error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pharmapos_db::{Database, DbConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(DbConfig::new("pharmapos.db")).await?;
//!     let lots = db.inventory().list_for_pharmacy("pharmacy-id").await?;
//!     println!("{} lots in stock", lots.len());
//!     Ok(())
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{AuthContext, CheckoutError, Receipt, SaleEngine, SaleRequest};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::inventory::{
    InventoryRepository, ReserveOutcome, StockSearchRow, StockSnapshot,
};
pub use repository::medicine::MedicineRepository;
pub use repository::pharmacy::PharmacyRepository;
pub use repository::report::{ReportRepository, SalesSummary};
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;
