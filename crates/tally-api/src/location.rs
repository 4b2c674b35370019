//! # Location Provider
//!
//! The seam between the login flow and whatever knows where the device is.
//! The terminal has no GPS, so it uses a position from configuration; tests
//! swap in a provider that refuses.

use tally_core::validation::validate_coordinates;
use tally_core::Coordinates;
use thiserror::Error;

/// Why no position is available.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    /// The user or the platform refused access.
    #[error("location permission denied")]
    PermissionDenied,

    /// Access is allowed but no fix could be obtained.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Source of the device's current position.
pub trait LocationProvider {
    fn current_location(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub const fn new(coordinates: Coordinates) -> Self {
        FixedLocation { coordinates }
    }
}

impl LocationProvider for FixedLocation {
    fn current_location(&self) -> Result<Coordinates, LocationError> {
        validate_coordinates(&self.coordinates)
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;
        Ok(self.coordinates)
    }
}

/// Behaves like a device where location permission was refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    fn current_location(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

impl<P: LocationProvider + ?Sized> LocationProvider for &P {
    fn current_location(&self) -> Result<Coordinates, LocationError> {
        (**self).current_location()
    }
}

impl<P: LocationProvider + ?Sized> LocationProvider for Box<P> {
    fn current_location(&self) -> Result<Coordinates, LocationError> {
        (**self).current_location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_location() {
        let provider = FixedLocation::new(Coordinates::new(10.776, 106.700));
        assert_eq!(
            provider.current_location(),
            Ok(Coordinates::new(10.776, 106.700))
        );
    }

    #[test]
    fn test_fixed_location_out_of_range() {
        let provider = FixedLocation::new(Coordinates::new(91.0, 0.0));
        assert!(matches!(
            provider.current_location(),
            Err(LocationError::Unavailable(_))
        ));
    }

    #[test]
    fn test_denied_location() {
        let provider: Box<dyn LocationProvider> = Box::new(DeniedLocation);
        assert_eq!(
            provider.current_location(),
            Err(LocationError::PermissionDenied)
        );
    }
}
