//! # Repository Module
//!
//! Database repository implementations for PharmaPOS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Caller / SaleEngine                                                   │
//! │       │                                                                 │
//! │       │  db.inventory().reserve(&mut tx, ...)                          │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                   │
//! │  ├── reserve(conn, pharmacy_id, inventory_id, qty)                     │
//! │  ├── get(pharmacy_id, id)                                              │
//! │  ├── add_record(record)                                                │
//! │  └── restock(pharmacy_id, id, qty)                                     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Transaction-scoped operations take an explicit connection           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`inventory::InventoryRepository`] - Stock lots, reservation, expiry alerts
//! - [`sale::SaleRepository`] - Sale header and line item persistence
//! - [`medicine::MedicineRepository`] - Catalog insert and search
//! - [`pharmacy::PharmacyRepository`] - Pharmacy CRUD
//! - [`user::UserRepository`] - User rows for sale attribution
//! - [`report::ReportRepository`] - Revenue aggregates

pub mod inventory;
pub mod medicine;
pub mod pharmacy;
pub mod report;
pub mod sale;
pub mod user;
