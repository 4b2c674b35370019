//! # REST Client
//!
//! One shared [`reqwest::Client`] plus the base URL of the backend. Resource
//! clients borrow nothing: each holds a cheap clone of [`ApiClient`].
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Path                                    │
//! │                                                                         │
//! │  client.orders().create(&payload)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  endpoint("Order")  ──►  https://…/api/v1/Order                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reqwest (timeout from ApiConfig)                                      │
//! │       │                                                                 │
//! │       ├── transport failure ──► ApiError::Network / Timeout            │
//! │       ├── wrong status      ──► ApiError::UnexpectedStatus             │
//! │       └── bad JSON          ──► ApiError::Decode                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::resource::{OrderClient, ProductClient, UserClient};

/// Backend used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://67a28947409de5ed5255aeed.mockapi.io/api/v1";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Root of the REST collections, e.g. `https://host/api/v1`.
    pub base_url: String,

    /// Applied to every request, connect through body.
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Builder: sets the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Entry point for all backend calls.
///
/// ## Usage
/// ```rust,ignore
/// let client = ApiClient::new(ApiConfig::default())?;
///
/// let products = client.products().list_or_empty().await;
/// let history = client.orders().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Builds the HTTP client.
    ///
    /// Fails with [`ApiError::InvalidConfig`] when the base URL is not an
    /// absolute http(s) URL or the timeout is zero.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        if config.request_timeout.is_zero() {
            return Err(ApiError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        let base = parse_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        debug!(base_url = %base, timeout_secs = config.request_timeout.as_secs(), "API client ready");
        Ok(ApiClient { http, base })
    }

    /// `/Product`
    pub fn products(&self) -> ProductClient {
        ProductClient::new(self.clone())
    }

    /// `/Order`
    pub fn orders(&self) -> OrderClient {
        OrderClient::new(self.clone())
    }

    /// `/Register`
    pub fn users(&self) -> UserClient {
        UserClient::new(self.clone())
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // =========================================================================
    // Request helpers shared by the resource clients
    // =========================================================================

    pub(crate) fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http.request(method, url)
    }

    /// `GET` a collection or record and decode it, accepting any 2xx.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.request(Method::GET, url).send().await?;
        let response = expect_success(Method::GET, response)?;
        Ok(response.json::<T>().await?)
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidConfig("base URL is required".to_string()));
    }

    let mut base = Url::parse(trimmed)?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ApiError::InvalidConfig(format!(
            "unsupported URL scheme '{}'",
            base.scheme()
        )));
    }

    // Url::join replaces the last segment unless the path ends with '/'.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Passes any 2xx response through.
pub(crate) fn expect_success(method: Method, response: Response) -> ApiResult<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(unexpected_status(method, &response))
    }
}

/// Passes only the given status through.
pub(crate) fn expect_status(
    method: Method,
    expected: StatusCode,
    response: Response,
) -> ApiResult<Response> {
    if response.status() == expected {
        Ok(response)
    } else {
        Err(unexpected_status(method, &response))
    }
}

pub(crate) fn unexpected_status(method: Method, response: &Response) -> ApiError {
    ApiError::UnexpectedStatus {
        method: method.to_string(),
        url: response.url().to_string(),
        status: response.status().as_u16(),
    }
}
