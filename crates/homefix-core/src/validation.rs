//! # Validation Module
//!
//! Input checks shared by the quotation and price-calculator engines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command DTO conversion (pricing-desk)                        │
//! │  ├── JSON numbers → Money / Percent / Quantity                         │
//! │  └── NaN / ∞ rejected as NotANumber                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── sign checks (negative cost, rate, quantity)                       │
//! │  └── engine limits (MAX_AMOUNT, MAX_RATE_BPS, ...)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine (quotation.rs / pricing.rs)                           │
//! │  └── pure arithmetic, cannot fail                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use homefix_core::money::Money;
//! use homefix_core::validation::validate_non_negative_money;
//!
//! assert!(validate_non_negative_money(Money::from_dong(0), "laborCost").is_ok());
//! assert!(validate_non_negative_money(Money::from_dong(-1), "laborCost").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Percent, Quantity};
use crate::{MAX_AMOUNT, MAX_ITEM_NAME_LEN, MAX_LINE_ITEMS, MAX_QUANTITY_MILLI, MAX_RATE_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cost or price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free call-out, no travel)
/// - Must not exceed `MAX_AMOUNT`
pub fn validate_non_negative_money(amount: Money, field: &str) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    if amount.dong() > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT,
        });
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_QUANTITY_MILLI`
pub fn validate_positive_quantity(qty: Quantity, field: &str) -> ValidationResult<()> {
    if qty.milli() <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if qty.milli() > MAX_QUANTITY_MILLI {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_QUANTITY_MILLI / 1_000,
        });
    }

    Ok(())
}

/// Validates a margin, tax or markup rate.
///
/// ## Rules
/// - Must be non-negative (0 % means "no markup")
/// - Must not exceed `MAX_RATE_BPS` (1000 %)
///
/// ## Example
/// ```rust
/// use homefix_core::types::Percent;
/// use homefix_core::validation::validate_rate;
///
/// assert!(validate_rate(Percent::from_percent(30), "profitRate").is_ok());
/// assert!(validate_rate(Percent::from_percent(-1), "profitRate").is_err());
/// ```
pub fn validate_rate(rate: Percent, field: &str) -> ValidationResult<()> {
    if rate.bps() < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    if rate.bps() > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_RATE_BPS / 100,
        });
    }

    Ok(())
}

// =============================================================================
// Collection / String Validators
// =============================================================================

/// Validates the number of rows on a quotation.
pub fn validate_item_count(count: usize) -> ValidationResult<()> {
    if count > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 0,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    Ok(())
}

/// Validates a line item name (already known to be non-empty).
pub fn validate_item_name(name: &str, field: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
