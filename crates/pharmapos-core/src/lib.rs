//! # pharmapos-core: Pure Business Logic for PharmaPOS
//!
//! This crate is the **heart** of the pharmacy point-of-sale backend.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PharmaPOS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Callers (HTTP layer, external)                     │   │
//! │  │    auth, routing, request decoding - NOT this workspace         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pharmapos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ Inventory │  │   Money   │  │ price_sale│  │   rules   │  │   │
//! │  │   │ Sale/Item │  │ Discount  │  │ Breakdown │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                pharmapos-db (Database Layer)                    │   │
//! │  │      SQLite repositories, migrations, checkout::SaleEngine      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryRecord, Sale, SaleItem, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - The pure sale pricing calculator
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use pharmapos_core::money::Money;
//! use pharmapos_core::pricing::{price_sale, PricedLine};
//! use pharmapos_core::types::DiscountRate;
//!
//! let lines = vec![PricedLine {
//!     inventory_id: "inv-1".into(),
//!     quantity: 3,
//!     unit_price: Money::from_cents(100),
//! }];
//!
//! let receipt = price_sale(
//!     &lines,
//!     DiscountRate::from_bps(1000),
//!     Money::zero(),
//!     Money::from_cents(300),
//! )
//! .unwrap();
//!
//! assert_eq!(receipt.net_payable.cents(), 270);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pharmapos_core::Money` instead of
// `use pharmapos_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{price_sale, PricedLine, PricingBreakdown};
pub use types::*;
pub use validation::validate_sale_request;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-pharmacy in future versions.
pub const MAX_LINE_QUANTITY: i64 = 9999;

/// Maximum line items allowed in a single sale
///
/// ## Business Reason
/// Prevents runaway baskets and keeps the reservation loop bounded.
pub const MAX_SALE_LINES: usize = 200;
