//! # Command Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal                           │
//! │                                                                         │
//! │  Command Function  ──►  CommandResult<T>                               │
//! │         │                                                               │
//! │         ├── ValidationError ──┐                                         │
//! │         ├── CoreError ────────┤                                         │
//! │         ├── ApiError ─────────┼──►  CommandError { code, message }     │
//! │         └── ConfigError ──────┘              │                          │
//! │                                              ▼                          │
//! │                         shell prints   "error [EMPTY_ORDER]: ..."      │
//! │                         one-shot exits with status 1                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing below the command layer is shown raw to the cashier: each error
//! is mapped to a code plus a message written for the person at the till.

use std::fmt;

use serde::Serialize;
use tally_api::ApiError;
use tally_core::{CoreError, ValidationError};

use crate::config::ConfigError;

/// Result type for terminal commands.
pub type CommandResult<T> = Result<T, CommandError>;

/// What a failed command reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    /// Machine-readable code, also used in `--json` output.
    pub code: ErrorCode,

    /// Message shown to the cashier.
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or order id not known
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Checkout with nothing in the order
    EmptyOrder,

    /// Checkout while a submission is still running
    CheckoutInProgress,

    /// Login rejected
    InvalidCredentials,

    /// Location permission refused or no position available
    LocationDenied,

    /// Backend unreachable, slow, or answered unexpectedly
    NetworkError,

    /// Session file or receipt file could not be used
    StorageError,

    /// Bad configuration
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::EmptyOrder => "EMPTY_ORDER",
            ErrorCode::CheckoutInProgress => "CHECKOUT_IN_PROGRESS",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::LocationDenied => "LOCATION_DENIED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CommandError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::validation(err.to_string())
    }
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LineItemNotFound(id) => CommandError::new(
                ErrorCode::NotFound,
                format!("Product {id} is not in the order"),
            ),
            CoreError::EmptyOrder => {
                CommandError::new(ErrorCode::EmptyOrder, "No products in the order list")
            }
            CoreError::InvalidAmount { value, reason } => CommandError::validation(format!(
                "Invalid amount '{value}': {reason}"
            )),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(e) => {
                tracing::error!("Network failure: {}", e);
                CommandError::new(ErrorCode::NetworkError, "Could not reach the server")
            }
            ApiError::Timeout { url } => {
                tracing::error!(%url, "Request timed out");
                CommandError::new(ErrorCode::NetworkError, "The server took too long to answer")
            }
            ApiError::UnexpectedStatus { method, url, status } => {
                tracing::error!(%method, %url, status, "Unexpected HTTP status");
                CommandError::new(
                    ErrorCode::NetworkError,
                    format!("The server rejected the request (HTTP {status})"),
                )
            }
            ApiError::Decode(e) => {
                tracing::error!("Undecodable response: {}", e);
                CommandError::new(ErrorCode::NetworkError, "The server sent an unreadable response")
            }
            ApiError::InvalidCredentials => {
                CommandError::new(ErrorCode::InvalidCredentials, "Invalid username or password")
            }
            ApiError::UserNotFound(id) => CommandError::not_found("User", &id),
            ApiError::LocationDenied(reason) => CommandError::new(
                ErrorCode::LocationDenied,
                format!("Location is required to log in: {reason}"),
            ),
            ApiError::Session(e) => CommandError::new(ErrorCode::StorageError, e),
            ApiError::InvalidConfig(e) => CommandError::new(ErrorCode::ConfigError, e),
            ApiError::Core(e) => e.into(),
        }
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CommandError {}
