//! # Validation Module
//!
//! Input validation run at the command boundary, before any business logic
//! or network request.
//!
//! ```rust
//! use tally_core::validation::{validate_credentials, validate_window_days};
//!
//! assert!(validate_credentials("cashier", "secret").is_ok());
//! assert!(validate_credentials("cashier", "").is_err());
//! assert!(validate_window_days(7).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::Coordinates;
use crate::MAX_WINDOW_DAYS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Both username and password must be present.
///
/// Whitespace-only values count as missing.
pub fn validate_credentials(username: &str, password: &str) -> ValidationResult<()> {
    required("username", username)?;
    required("password", password)
}

/// A product id must not be blank.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    required("product id", id)
}

/// Order ids are looked up verbatim; they only need to be present.
pub fn validate_order_id(id: &str) -> ValidationResult<()> {
    required("order id", id)
}

/// The daily revenue window is between 1 day and [`MAX_WINDOW_DAYS`].
pub fn validate_window_days(days: u32) -> ValidationResult<()> {
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "days".to_string(),
            min: 1,
            max: i64::from(MAX_WINDOW_DAYS),
        });
    }
    Ok(())
}

/// Latitude within ±90°, longitude within ±180°, both finite.
pub fn validate_coordinates(coords: &Coordinates) -> ValidationResult<()> {
    if !coords.latitude.is_finite() || !(-90.0..=90.0).contains(&coords.latitude) {
        return Err(ValidationError::OutOfRange {
            field: "latitude".to_string(),
            min: -90,
            max: 90,
        });
    }
    if !coords.longitude.is_finite() || !(-180.0..=180.0).contains(&coords.longitude) {
        return Err(ValidationError::OutOfRange {
            field: "longitude".to_string(),
            min: -180,
            max: 180,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials() {
        assert!(validate_credentials("anna", "pw").is_ok());

        let err = validate_credentials("", "pw").unwrap_err();
        assert_eq!(err.to_string(), "username is required");

        let err = validate_credentials("anna", "   ").unwrap_err();
        assert_eq!(err.to_string(), "password is required");
    }

    #[test]
    fn test_ids() {
        assert!(validate_product_id("12").is_ok());
        assert!(validate_product_id(" ").is_err());
        assert!(validate_order_id("").is_err());
    }

    #[test]
    fn test_window_days() {
        assert!(validate_window_days(1).is_ok());
        assert!(validate_window_days(MAX_WINDOW_DAYS).is_ok());
        assert!(validate_window_days(0).is_err());
        assert!(validate_window_days(MAX_WINDOW_DAYS + 1).is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(validate_coordinates(&Coordinates::new(10.77, 106.70)).is_ok());
        assert!(validate_coordinates(&Coordinates::new(-90.0, 180.0)).is_ok());
        assert!(validate_coordinates(&Coordinates::new(91.0, 0.0)).is_err());
        assert!(validate_coordinates(&Coordinates::new(0.0, -180.5)).is_err());
        assert!(validate_coordinates(&Coordinates::new(f64::NAN, 0.0)).is_err());
    }
}
