//! # Error Types
//!
//! The pricing engine has exactly one failure kind: bad input.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  homefix-core (this file)                                              │
//! │  └── ValidationError  - input rejected, names the offending field      │
//! │                                                                         │
//! │  pricing-desk (app)                                                    │
//! │  └── ApiError         - what the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → ApiError { code, message, field } → Frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calculations either return every derived field or fail before producing
//! anything. Nothing here is transient, so nothing is retried.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Field names use the camelCase spelling the callers send
/// (`baseCost`, `items[2].quantity`), so a message can be attached to the
/// right form control without translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotANumber { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::NotANumber { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLong { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for engine results.
pub type CoreResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::MustBeNonNegative {
            field: "baseCost".to_string(),
        };
        assert_eq!(err.to_string(), "baseCost must not be negative");

        let err = ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 0,
            max: 500,
        };
        assert_eq!(err.to_string(), "items must be between 0 and 500");
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::NotANumber {
            field: "items[1].unitPrice".to_string(),
        };
        assert_eq!(err.field(), "items[1].unitPrice");

        let err = ValidationError::TooLong {
            field: "items[0].name".to_string(),
            max: 200,
        };
        assert_eq!(err.field(), "items[0].name");
    }
}
