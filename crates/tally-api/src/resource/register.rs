//! # User Client
//!
//! Registered cashiers live in the `/Register` collection. Each record keeps
//! a growing history of the device positions captured at login.
//!
//! Fields this client does not know about are carried through untouched, so
//! a `PUT` sends back exactly what `GET` returned plus the new location.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::client::{expect_success, ApiClient};
use crate::error::{ApiError, ApiResult};
use tally_core::Coordinates;

const PATH: &str = "Register";

/// A registered cashier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub username: String,

    /// Empty on the copy kept in the session cache, and then not written.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    /// Positions captured at each login, oldest first.
    #[serde(default)]
    pub location: Vec<Coordinates>,

    /// Anything else the backend stores on the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Exact, case-sensitive credential match.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    /// The display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

/// Client for the `/Register` collection.
#[derive(Debug, Clone)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    pub fn new(api: ApiClient) -> Self {
        UserClient { api }
    }

    /// Fetches every registered user. Records that do not decode are skipped.
    pub async fn list(&self) -> ApiResult<Vec<User>> {
        let records: Vec<Value> = self.api.get_json(PATH).await?;

        let users: Vec<User> = records
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<User>(value) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed user record");
                    None
                }
            })
            .collect();

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Fetches one user.
    ///
    /// A `404` maps to [`ApiError::UserNotFound`].
    pub async fn get(&self, id: &str) -> ApiResult<User> {
        let url = self.api.endpoint(&format!("{PATH}/{id}"))?;
        debug!(%url, "GET");

        let response = self.api.request(Method::GET, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::UserNotFound(id.to_string()));
        }
        let response = expect_success(Method::GET, response)?;
        Ok(response.json::<User>().await?)
    }

    /// Replaces the stored record with `user`. Returns what the backend echoed.
    pub async fn update(&self, user: &User) -> ApiResult<User> {
        let url = self.api.endpoint(&format!("{PATH}/{}", user.id))?;
        debug!(%url, "PUT");

        let response = self
            .api
            .request(Method::PUT, url)
            .json(user)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::UserNotFound(user.id.clone()));
        }
        let response = expect_success(Method::PUT, response)?;
        Ok(response.json::<User>().await?)
    }

    /// Appends `coordinates` to the user's location history.
    ///
    /// Reads the current record first so concurrent edits to other fields
    /// are not overwritten with a stale copy.
    pub async fn append_location(&self, id: &str, coordinates: Coordinates) -> ApiResult<User> {
        let mut user = self.get(id).await?;
        user.location.push(coordinates);

        let updated = self.update(&user).await?;
        info!(
            user_id = %id,
            history = updated.location.len(),
            "Location appended"
        );
        Ok(updated)
    }
}
