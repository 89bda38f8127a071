//! # Domain Types
//!
//! Core domain types used throughout PharmaPOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InventoryRecord │   │      Sale       │   │    SaleItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  pharmacy_id    │   │  pharmacy_id    │   │  sale_id (FK)   │       │
//! │  │  medicine_id?   │   │  total_cents    │   │  inventory_id   │       │
//! │  │  quantity       │   │  discount_cents │   │  unit_price     │       │
//! │  │  sale_price     │   │  due / change   │   │  subtotal       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │    Medicine     │   │    Pharmacy     │       │
//! │  │  bps (u32)      │   │  brand/generic  │   │  name, owner    │       │
//! │  │  1000 = 10%     │   │  manufacturer   │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has an `id` (UUID v4, immutable, used for relations);
//! business identifiers (pharmacy name, medicine brand name) live
//! alongside and may change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10%. Integer bps keep discount math exact; the system
/// supports percentage discounts only (no absolute-amount variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Pharmacy & User
// =============================================================================

/// A pharmacy (tenant). All inventory and sales belong to exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Pharmacy {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning user.
    pub owner_id: String,

    /// Display name.
    pub name: String,

    /// Optional street address.
    pub address: Option<String>,

    /// Optional contact phone.
    pub phone: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user who records sales. Authentication and session issuance are
/// external collaborators; this type exists so sales can reference the
/// cashier who made them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// "owner" or "employee".
    pub role: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Medicine
// =============================================================================

/// A catalog medicine. Inventory records may reference one, or stand
/// alone for custom/unlisted items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Medicine {
    pub id: String,
    pub brand_name: String,
    pub generic_name: String,
    pub manufacturer: Option<String>,
    /// Dosage form: "tablet", "syrup", etc.
    pub form: Option<String>,
    pub strength: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inventory Record
// =============================================================================

/// A stock lot owned by one pharmacy.
///
/// Mutated only by stock-in operations and by sale decrements; the
/// quantity is never allowed below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning pharmacy.
    pub pharmacy_id: String,

    /// Catalog medicine, absent for custom/unlisted items.
    pub medicine_id: Option<String>,

    /// Units on hand. Invariant: >= 0.
    pub quantity: i64,

    /// Purchase cost per unit, in cents.
    pub unit_cost_cents: i64,

    /// Sale price per unit, in cents. Snapshotted onto sale items at
    /// reservation time.
    pub unit_sale_cents: i64,

    /// Expiry date of this lot, if known.
    pub expiry_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    /// Returns the unit sale price as Money.
    #[inline]
    pub fn unit_sale_price(&self) -> Money {
        Money::from_cents(self.unit_sale_cents)
    }

    /// Returns the unit cost price as Money.
    #[inline]
    pub fn unit_cost_price(&self) -> Money {
        Money::from_cents(self.unit_cost_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale transaction. Immutable once created; there is no
/// update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub pharmacy_id: String,
    /// Cashier who recorded the sale.
    pub user_id: String,
    /// Pre-discount sum of line subtotals, in cents.
    pub total_cents: i64,
    /// Discount amount applied, in cents.
    pub discount_cents: i64,
    /// Amount the customer paid, in cents.
    pub paid_cents: i64,
    /// Shortfall still owed, in cents. Invariant: due * change == 0.
    pub due_cents: i64,
    /// Caller-supplied rounding adjustment, signed cents.
    pub round_off_cents: i64,
    /// Excess returned to the customer, in cents.
    pub change_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Net payable: total - discount + round_off, floored at zero.
    pub fn net_payable(&self) -> Money {
        (Money::from_cents(self.total_cents) - Money::from_cents(self.discount_cents)
            + Money::from_cents(self.round_off_cents))
        .clamp_non_negative()
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses the snapshot pattern: the unit price is frozen at reservation
/// time, so later price changes never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    /// Catalog medicine the line drew from, if any.
    pub medicine_id: Option<String>,
    /// Inventory lot the line drew from.
    pub inventory_id: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit_price, in cents.
    pub subtotal_cents: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Sale Request
// =============================================================================

/// One requested line of a sale, as sent by the caller.
///
/// `medicine_id` is advisory: the authoritative medicine reference is
/// the one on the inventory record at reservation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineRequest {
    pub inventory_id: String,
    pub medicine_id: Option<String>,
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
