//! # Sale Engine
//!
//! Orchestrates a complete sale: validation, stock reservation,
//! pricing, and persistence, all inside one database transaction.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       process_sale pipeline                             │
//! │                                                                         │
//! │  validate request            (no database access on failure)           │
//! │        │                                                                │
//! │  aggregate lines per lot     (BTreeMap: fixed ascending-id order)      │
//! │        │                                                                │
//! │  BEGIN ─┬─ reserve lot 1     (conditional decrement + price snapshot)  │
//! │         ├─ reserve lot 2                                                │
//! │         ├─ price             (pure math on the snapshots)              │
//! │         ├─ insert sale                                                  │
//! │         └─ insert items      (one row per requested line)              │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure before COMMIT rolls everything back; a sale either        │
//! │  exists with all its decrements or leaves no trace at all.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reserving lots in ascending-id order keeps every sale touching the
//! same lots in the same order, which matters if this engine is ever
//! pointed at a backend with row-level locking.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::DbError;
use crate::repository::inventory::{InventoryRepository, ReserveOutcome, StockSnapshot};
use crate::repository::sale::{generate_sale_id, generate_sale_item_id, SaleRepository};
use pharmapos_core::{
    price_sale, validate_sale_request, DiscountRate, Money, PricedLine, PricingBreakdown, Sale,
    SaleItem, SaleLineRequest, ValidationError,
};

// =============================================================================
// Request / Response Types
// =============================================================================

/// Identity of the caller, resolved by an outer layer before the
/// engine is invoked.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub pharmacy_id: String,
    pub user_id: String,
}

/// A sale as requested at the counter.
#[derive(Debug, Clone)]
pub struct SaleRequest {
    pub lines: Vec<SaleLineRequest>,
    pub discount: DiscountRate,
    /// Cash rounding adjustment, signed cents.
    pub round_off_cents: i64,
    /// Amount tendered, in cents.
    pub paid_cents: i64,
}

/// The committed sale, returned to the caller for printing.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    pub breakdown: PricingBreakdown,
}

// =============================================================================
// Error Taxonomy
// =============================================================================

/// Failure modes of a sale attempt.
///
/// The first three are caller faults (fix the request and resubmit);
/// `Storage` is an infrastructure fault and may be retryable.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Request rejected before any database access.
    #[error("Invalid sale request: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced inventory does not exist for this pharmacy.
    #[error("Inventory record not found: {0}")]
    InventoryNotFound(String),

    /// Requested quantity exceeds available stock.
    #[error("Insufficient stock for {inventory_id}: {available} available, {requested} requested")]
    InsufficientStock {
        inventory_id: String,
        available: i64,
        requested: i64,
    },

    /// Database failure; check `is_retryable`.
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

impl CheckoutError {
    /// Whether re-submitting the same request could succeed without
    /// any change from the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::Storage(e) => e.is_retryable(),
            _ => false,
        }
    }
}

// =============================================================================
// Sale Engine
// =============================================================================

/// Coordinates the sale transaction across the inventory and sale
/// repositories.
#[derive(Debug, Clone)]
pub struct SaleEngine {
    pool: SqlitePool,
    inventory: InventoryRepository,
    sales: SaleRepository,
}

impl SaleEngine {
    /// Creates a new SaleEngine over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        SaleEngine {
            inventory: InventoryRepository::new(pool.clone()),
            sales: SaleRepository::new(pool.clone()),
            pool,
        }
    }

    /// Processes a complete sale atomically.
    ///
    /// ## Errors
    /// * `Validation` - malformed request; storage never touched
    /// * `InventoryNotFound` - a line references a lot this pharmacy
    ///   does not have
    /// * `InsufficientStock` - a lot cannot cover its aggregated
    ///   quantity; no stock is decremented
    /// * `Storage` - database failure; `is_retryable()` distinguishes
    ///   transient contention from hard faults
    pub async fn process_sale(
        &self,
        ctx: &AuthContext,
        request: &SaleRequest,
    ) -> Result<Receipt, CheckoutError> {
        validate_sale_request(&request.lines, request.discount, request.paid_cents)?;

        // Two lines drawing from the same lot must reserve once, with
        // their combined quantity. BTreeMap also fixes the reservation
        // order to ascending lot id.
        let mut wanted: BTreeMap<&str, i64> = BTreeMap::new();
        for line in &request.lines {
            *wanted.entry(line.inventory_id.as_str()).or_insert(0) += line.quantity;
        }

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let mut snapshots: BTreeMap<&str, StockSnapshot> = BTreeMap::new();
        for (&inventory_id, &quantity) in &wanted {
            let outcome = self
                .inventory
                .reserve(&mut tx, &ctx.pharmacy_id, inventory_id, quantity)
                .await?;

            match outcome {
                ReserveOutcome::Reserved(snapshot) => {
                    snapshots.insert(inventory_id, snapshot);
                }
                ReserveOutcome::NotFound => {
                    tx.rollback().await.map_err(DbError::from)?;
                    warn!(inventory_id = %inventory_id, "Sale rejected: lot not found");
                    return Err(CheckoutError::InventoryNotFound(inventory_id.to_string()));
                }
                ReserveOutcome::InsufficientStock { available } => {
                    tx.rollback().await.map_err(DbError::from)?;
                    warn!(
                        inventory_id = %inventory_id,
                        available = %available,
                        requested = %quantity,
                        "Sale rejected: insufficient stock"
                    );
                    return Err(CheckoutError::InsufficientStock {
                        inventory_id: inventory_id.to_string(),
                        available,
                        requested: quantity,
                    });
                }
            }
        }

        // Price the requested lines as sent, each with the unit price
        // snapshotted for its lot above.
        let priced: Vec<PricedLine> = request
            .lines
            .iter()
            .map(|line| PricedLine {
                inventory_id: line.inventory_id.clone(),
                quantity: line.quantity,
                unit_price: Money::from_cents(
                    snapshots[line.inventory_id.as_str()].unit_sale_cents,
                ),
            })
            .collect();

        let breakdown = price_sale(
            &priced,
            request.discount,
            Money::from_cents(request.round_off_cents),
            Money::from_cents(request.paid_cents),
        )?;

        let sale = Sale {
            id: generate_sale_id(),
            pharmacy_id: ctx.pharmacy_id.clone(),
            user_id: ctx.user_id.clone(),
            total_cents: breakdown.total.cents(),
            discount_cents: breakdown.discount.cents(),
            paid_cents: breakdown.paid.cents(),
            due_cents: breakdown.due.cents(),
            round_off_cents: breakdown.round_off.cents(),
            change_cents: breakdown.change.cents(),
            created_at: Utc::now(),
        };
        self.sales.insert_sale(&mut tx, &sale).await?;

        // Items mirror the request: one row per requested line, priced
        // from the reservation snapshot for its lot.
        let mut items = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            let snap = &snapshots[line.inventory_id.as_str()];
            let item = SaleItem {
                id: generate_sale_item_id(),
                sale_id: sale.id.clone(),
                medicine_id: snap.medicine_id.clone(),
                inventory_id: line.inventory_id.clone(),
                quantity: line.quantity,
                unit_price_cents: snap.unit_sale_cents,
                subtotal_cents: line.quantity * snap.unit_sale_cents,
            };
            self.sales.insert_item(&mut tx, &item).await?;
            items.push(item);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            sale_id = %sale.id,
            pharmacy_id = %ctx.pharmacy_id,
            total_cents = %sale.total_cents,
            net_cents = %breakdown.net_payable.cents(),
            lines = %items.len(),
            "Sale committed"
        );

        Ok(Receipt {
            sale,
            items,
            breakdown,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
