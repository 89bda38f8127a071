//! # Validation Module
//!
//! Input validation utilities for PharmaPOS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (HTTP layer, external)                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  └── Runs before any storage access                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{DiscountRate, SaleLineRequest};
use crate::{MAX_LINE_QUANTITY, MAX_SALE_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price or amount in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, zero payment)
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a discount rate.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
pub fn validate_discount(rate: DiscountRate) -> ValidationResult<()> {
    if rate.bps() > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Sale Request Validator
// =============================================================================

/// Validates a sale request before any storage access.
///
/// ## Rules
/// - At least one line item
/// - Every quantity positive and within range
/// - Paid amount non-negative
/// - Discount within 0..=100%
pub fn validate_sale_request(
    lines: &[SaleLineRequest],
    discount: DiscountRate,
    paid_cents: i64,
) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::EmptySale);
    }

    if lines.len() > MAX_SALE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_SALE_LINES as i64,
        });
    }

    for line in lines {
        if line.inventory_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "inventory_id".to_string(),
            });
        }
        validate_quantity(line.quantity)?;
    }

    validate_discount(discount)?;
    validate_amount_cents("paid_amount", paid_cents)?;

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity display name (pharmacy, medicine).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a UUID string format.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn req(inventory_id: &str, qty: i64) -> SaleLineRequest {
        SaleLineRequest {
            inventory_id: inventory_id.to_string(),
            medicine_id: None,
            quantity: qty,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_amount_cents() {
        assert!(validate_amount_cents("price", 0).is_ok());
        assert!(validate_amount_cents("price", 1099).is_ok());
        assert!(validate_amount_cents("price", -100).is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(DiscountRate::zero()).is_ok());
        assert!(validate_discount(DiscountRate::from_bps(10000)).is_ok());
        assert!(validate_discount(DiscountRate::from_bps(10001)).is_err());
    }

    #[test]
    fn test_validate_sale_request_happy_path() {
        let lines = vec![req("inv-1", 3), req("inv-2", 1)];
        assert!(validate_sale_request(&lines, DiscountRate::from_bps(500), 300).is_ok());
    }

    #[test]
    fn test_validate_sale_request_rejects_empty() {
        let err = validate_sale_request(&[], DiscountRate::zero(), 0).unwrap_err();
        assert!(matches!(err, ValidationError::EmptySale));
    }

    #[test]
    fn test_validate_sale_request_rejects_zero_quantity() {
        let lines = vec![req("inv-1", 0)];
        let err = validate_sale_request(&lines, DiscountRate::zero(), 0).unwrap_err();
        assert!(matches!(err, ValidationError::MustBePositive { .. }));
    }

    #[test]
    fn test_validate_sale_request_rejects_negative_paid() {
        let lines = vec![req("inv-1", 1)];
        let err = validate_sale_request(&lines, DiscountRate::zero(), -1).unwrap_err();
        assert!(matches!(err, ValidationError::MustBeNonNegative { .. }));
    }

    #[test]
    fn test_validate_sale_request_rejects_blank_inventory_id() {
        let lines = vec![req("  ", 1)];
        let err = validate_sale_request(&lines, DiscountRate::zero(), 0).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "City Pharmacy").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
