//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  An earlier version of this system priced sales in f64 and then        │
//! │  rounded at the end. Receipts drifted from inventory valuations by     │
//! │  a cent here and there.                                                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is an i64 count of the smallest currency unit.         │
//! │    Sums are exact; the single rounding point (percentage discount)     │
//! │    is explicit and tested.                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pharmapos_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // 10.99
//!
//! // Arithmetic operations
//! let line = price * 3;
//! let total = line + Money::from_cents(500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for round-off adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pharmapos_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use pharmapos_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// let subtotal = unit_price.multiply_quantity(3);
    /// assert_eq!(subtotal.cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Computes a percentage of this amount, rounding half-up.
    ///
    /// This is the only place pricing rounds. The rate is in basis
    /// points (1000 bps = 10%), and the formula is integer math:
    /// `(amount * bps + 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use pharmapos_core::money::Money;
    /// use pharmapos_core::types::DiscountRate;
    ///
    /// let total = Money::from_cents(30000);
    /// let rate = DiscountRate::from_bps(1000); // 10%
    /// assert_eq!(total.percentage_of(rate).cents(), 3000);
    /// ```
    pub fn percentage_of(&self, rate: DiscountRate) -> Money {
        // i128 intermediate to prevent overflow on large amounts
        let part = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(part as i64)
    }

    /// Clamps negative values to zero.
    ///
    /// Used for net payable: a large round-off or discount must never
    /// produce a negative amount owed.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Saturating difference floored at zero: `max(0, self - other)`.
    ///
    /// Due amount and change returned are both expressed this way, so
    /// at most one of the pair can ever be positive.
    #[inline]
    pub const fn excess_over(&self, other: Money) -> Self {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Callers format for display
/// themselves to handle currency symbols and localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_percentage_basic() {
        // 300.00 at 10% = 30.00
        let amount = Money::from_cents(30000);
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(amount.percentage_of(rate).cents(), 3000);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 10.01 at 2.5% = 0.250.. → 25 cents exactly at the boundary
        let amount = Money::from_cents(1001);
        let rate = DiscountRate::from_bps(250);
        // 1001 * 250 = 250250; (250250 + 5000) / 10000 = 25
        assert_eq!(amount.percentage_of(rate).cents(), 25);

        // 9.99 at 12.5%: 999 * 1250 = 1248750 → (+5000)/10000 = 125
        let amount = Money::from_cents(999);
        let rate = DiscountRate::from_bps(1250);
        assert_eq!(amount.percentage_of(rate).cents(), 125);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_cents(-50).clamp_non_negative().cents(), 0);
        assert_eq!(Money::from_cents(50).clamp_non_negative().cents(), 50);
    }

    #[test]
    fn test_excess_over() {
        let paid = Money::from_cents(30000);
        let net = Money::from_cents(27000);

        assert_eq!(paid.excess_over(net).cents(), 3000);
        assert_eq!(net.excess_over(paid).cents(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
