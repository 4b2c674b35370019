//! # tally-api: REST Client for Tally POS
//!
//! Talks to the hosted backend on behalf of the cashier terminal and keeps
//! the local session cache.
//!
//! ## Modules
//!
//! - [`client`] - `ApiClient` and its configuration
//! - [`resource`] - Per-collection clients (`/Product`, `/Order`, `/Register`)
//! - [`auth`] - Login / logout
//! - [`session`] - The on-disk session cache
//! - [`location`] - Device location seam
//! - [`error`] - `ApiError`
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tally_api::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(ApiConfig::default())?;
//! let catalog = client.products().list_or_empty().await;
//!
//! let payload = order.to_submission(uuid, chrono::Utc::now())?;
//! client.orders().create(&payload).await?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod location;
pub mod resource;
pub mod session;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::Authenticator;
pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use error::{ApiError, ApiResult};
pub use location::{DeniedLocation, FixedLocation, LocationError, LocationProvider};
pub use resource::{OrderClient, ProductClient, User, UserClient};
pub use session::{Session, SessionStore};
