//! # Pricing Module
//!
//! The pricing calculator: turns resolved line items plus discount,
//! round-off and paid amount into a priced receipt.
//!
//! ## Where Pricing Fits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sale Pricing Flow                                   │
//! │                                                                         │
//! │  Caller request (inventory_id, qty)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Reservation captures unit prices  (pharmapos-db)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  price_sale(lines, discount, round_off, paid) ← THIS MODULE            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricingBreakdown { total, discount, net, due, change }                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sale + SaleItem rows persisted in the same transaction                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing Policy
//! The system settled on one policy after several inconsistent
//! historical variants:
//! - Discount is a **percentage** in basis points, applied to the
//!   pre-discount total, rounded half-up to whole cents.
//! - `round_off` is a caller-supplied signed cent adjustment applied
//!   after the discount (cash-drawer rounding).
//! - `net_payable = max(0, total - discount + round_off)`
//! - `due = max(0, net - paid)`, `change = max(0, paid - net)`;
//!   never both positive.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::DiscountRate;

// =============================================================================
// Input / Output Types
// =============================================================================

/// One line item with its unit price already resolved from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub inventory_id: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl PricedLine {
    /// Line subtotal: quantity × unit price, exact in cents.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The priced receipt amounts for one sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Pre-discount sum of line subtotals.
    pub total: Money,
    /// Discount amount computed from `total` and the discount rate.
    pub discount: Money,
    /// Caller-supplied rounding adjustment, echoed back.
    pub round_off: Money,
    /// total - discount + round_off, floored at zero.
    pub net_payable: Money,
    /// Amount the customer paid.
    pub paid: Money,
    /// max(0, net_payable - paid).
    pub due: Money,
    /// max(0, paid - net_payable).
    pub change: Money,
}

// =============================================================================
// Calculator
// =============================================================================

/// Prices a sale. Pure function: no I/O, no shared state.
///
/// ## Arguments
/// * `lines` - Line items with unit prices captured at reservation time
/// * `discount` - Percentage discount in basis points
/// * `round_off` - Signed cent adjustment applied after the discount
/// * `paid` - Amount the customer paid
///
/// ## Errors
/// * `ValidationError::EmptySale` - no line items
/// * `ValidationError::MustBePositive` - any quantity <= 0
/// * `ValidationError::MustBeNonNegative` - negative paid amount
///
/// ## Example
/// ```rust
/// use pharmapos_core::money::Money;
/// use pharmapos_core::pricing::{price_sale, PricedLine};
/// use pharmapos_core::types::DiscountRate;
///
/// let lines = vec![PricedLine {
///     inventory_id: "inv-1".into(),
///     quantity: 3,
///     unit_price: Money::from_cents(100),
/// }];
///
/// let receipt = price_sale(
///     &lines,
///     DiscountRate::from_bps(1000), // 10%
///     Money::zero(),
///     Money::from_cents(300),
/// )
/// .unwrap();
///
/// assert_eq!(receipt.total.cents(), 300);
/// assert_eq!(receipt.discount.cents(), 30);
/// assert_eq!(receipt.net_payable.cents(), 270);
/// assert_eq!(receipt.change.cents(), 30);
/// assert_eq!(receipt.due.cents(), 0);
/// ```
pub fn price_sale(
    lines: &[PricedLine],
    discount: DiscountRate,
    round_off: Money,
    paid: Money,
) -> Result<PricingBreakdown, ValidationError> {
    if lines.is_empty() {
        return Err(ValidationError::EmptySale);
    }

    for line in lines {
        if line.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
    }

    if paid.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "paid_amount".to_string(),
        });
    }

    let total = lines
        .iter()
        .fold(Money::zero(), |acc, line| acc + line.subtotal());

    let discount_amount = total.percentage_of(discount);
    let net_payable = (total - discount_amount + round_off).clamp_non_negative();

    Ok(PricingBreakdown {
        total,
        discount: discount_amount,
        round_off,
        net_payable,
        paid,
        due: net_payable.excess_over(paid),
        change: paid.excess_over(net_payable),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, qty: i64, price: i64) -> PricedLine {
        PricedLine {
            inventory_id: id.to_string(),
            quantity: qty,
            unit_price: Money::from_cents(price),
        }
    }

    #[test]
    fn test_ten_percent_discount_with_change() {
        // 3 units @ 100, 10% off, paid 300
        let receipt = price_sale(
            &[line("inv-1", 3, 100)],
            DiscountRate::from_bps(1000),
            Money::zero(),
            Money::from_cents(300),
        )
        .unwrap();

        assert_eq!(receipt.total.cents(), 300);
        assert_eq!(receipt.discount.cents(), 30);
        assert_eq!(receipt.net_payable.cents(), 270);
        assert_eq!(receipt.due.cents(), 0);
        assert_eq!(receipt.change.cents(), 30);
    }

    #[test]
    fn test_partial_payment_produces_due() {
        let receipt = price_sale(
            &[line("inv-1", 2, 5000)],
            DiscountRate::zero(),
            Money::zero(),
            Money::from_cents(4000),
        )
        .unwrap();

        assert_eq!(receipt.total.cents(), 10000);
        assert_eq!(receipt.net_payable.cents(), 10000);
        assert_eq!(receipt.due.cents(), 6000);
        assert_eq!(receipt.change.cents(), 0);
    }

    #[test]
    fn test_due_and_change_never_both_positive() {
        for paid in [0, 100, 269, 270, 271, 1000] {
            let receipt = price_sale(
                &[line("inv-1", 3, 100)],
                DiscountRate::from_bps(1000),
                Money::zero(),
                Money::from_cents(paid),
            )
            .unwrap();
            assert_eq!(
                receipt.due.cents() * receipt.change.cents(),
                0,
                "paid={paid}"
            );
        }
    }

    #[test]
    fn test_round_off_applies_after_discount() {
        // total 995, 10% → discount 100 (rounds up from 99.5), round_off -5
        let receipt = price_sale(
            &[line("inv-1", 5, 199)],
            DiscountRate::from_bps(1000),
            Money::from_cents(-5),
            Money::from_cents(890),
        )
        .unwrap();

        assert_eq!(receipt.total.cents(), 995);
        assert_eq!(receipt.discount.cents(), 100);
        assert_eq!(receipt.net_payable.cents(), 890);
        assert_eq!(receipt.due.cents(), 0);
        assert_eq!(receipt.change.cents(), 0);
    }

    #[test]
    fn test_net_payable_clamped_at_zero() {
        // 100% discount plus negative round_off
        let receipt = price_sale(
            &[line("inv-1", 1, 100)],
            DiscountRate::from_bps(10000),
            Money::from_cents(-50),
            Money::zero(),
        )
        .unwrap();

        assert_eq!(receipt.net_payable.cents(), 0);
        assert_eq!(receipt.due.cents(), 0);
        assert_eq!(receipt.change.cents(), 0);
    }

    #[test]
    fn test_multiline_total_is_exact_sum() {
        let lines = vec![line("a", 3, 333), line("b", 7, 101), line("a", 2, 333)];
        let receipt = price_sale(
            &lines,
            DiscountRate::zero(),
            Money::zero(),
            Money::zero(),
        )
        .unwrap();

        let expected: i64 = lines.iter().map(|l| l.subtotal().cents()).sum();
        assert_eq!(receipt.total.cents(), expected);
    }

    #[test]
    fn test_rejects_empty_sale() {
        let err = price_sale(
            &[],
            DiscountRate::zero(),
            Money::zero(),
            Money::zero(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::EmptySale));
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        for qty in [0, -1] {
            let err = price_sale(
                &[line("inv-1", qty, 100)],
                DiscountRate::zero(),
                Money::zero(),
                Money::zero(),
            )
            .unwrap_err();
            assert!(matches!(err, ValidationError::MustBePositive { .. }));
        }
    }

    #[test]
    fn test_rejects_negative_paid_amount() {
        let err = price_sale(
            &[line("inv-1", 1, 100)],
            DiscountRate::zero(),
            Money::zero(),
            Money::from_cents(-1),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::MustBeNonNegative { .. }));
    }
}
