//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Order-list and domain rule failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-api errors (separate crate)                                     │
//! │  └── ApiError         - HTTP, session and login failures               │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── CommandError     - What the cashier sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → CommandError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line item in the current order carries this product id.
    ///
    /// ## When This Occurs
    /// - `increase` / `decrease` on a product that was never added
    /// - The item was removed by an earlier action
    ///
    /// The order is left untouched, so callers may treat this as a no-op.
    #[error("Product {0} is not in the order")]
    LineItemNotFound(String),

    /// Checkout was attempted with no line items.
    #[error("No products in the order list")]
    EmptyOrder,

    /// A monetary amount could not be interpreted.
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic or network call runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a price that is not a decimal number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineItemNotFound("42".to_string());
        assert_eq!(err.to_string(), "Product 42 is not in the order");
        assert_eq!(
            CoreError::EmptyOrder.to_string(),
            "No products in the order list"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::OutOfRange {
            field: "days".to_string(),
            min: 1,
            max: 366,
        };
        assert_eq!(err.to_string(), "days must be between 1 and 366");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "password".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
