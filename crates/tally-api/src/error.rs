//! # API Error Types
//!
//! Error types for REST calls, the session cache and the login flow.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Network      │  │      Data       │  │     Validation          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Network        │  │  Decode         │  │  Core(EmptyOrder)       │ │
//! │  │  Timeout        │  │  InvalidCreds   │  │  Core(Validation)       │ │
//! │  │  UnexpectedStat │  │  UserNotFound   │  │  LocationDenied         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Session      │  │ Configuration   │                              │
//! │  │  Session        │  │  InvalidConfig  │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures of the REST client and the login flow.
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Network Errors
    // =========================================================================
    /// The request could not be sent or the connection broke.
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not finish within the configured timeout.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The server answered with a status the operation does not accept.
    #[error("{method} {url} returned HTTP {status}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
    },

    // =========================================================================
    // Data Errors
    // =========================================================================
    /// The response body was not the expected JSON.
    #[error("Could not decode response: {0}")]
    Decode(String),

    /// No user matches the username/password pair.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// `GET /Register/{id}` found nothing.
    #[error("User not found: {0}")]
    UserNotFound(String),

    // =========================================================================
    // Device Errors
    // =========================================================================
    /// The location provider refused or failed.
    #[error("Location unavailable: {0}")]
    LocationDenied(String),

    /// The local session file could not be read or written.
    #[error("Session storage error: {0}")]
    Session(String),

    // =========================================================================
    // Configuration / Domain Errors
    // =========================================================================
    /// The base URL or client settings are unusable.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// A domain rule rejected the operation before any request was made.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Core(CoreError::Validation(err))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|url| url.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        if err.is_timeout() {
            ApiError::Timeout { url }
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidConfig(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_wraps_through_core() {
        let err: ApiError = ValidationError::Required {
            field: "username".into(),
        }
        .into();
        assert!(matches!(err, ApiError::Core(CoreError::Validation(_))));
        assert_eq!(err.to_string(), "Validation error: username is required");
    }

    #[test]
    fn test_status_message() {
        let err = ApiError::UnexpectedStatus {
            method: "POST".into(),
            url: "http://api/Order".into(),
            status: 500,
        };
        assert_eq!(err.to_string(), "POST http://api/Order returned HTTP 500");
    }
}
