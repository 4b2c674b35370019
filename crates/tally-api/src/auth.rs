//! # Login Flow
//!
//! ## Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Login                                          │
//! │                                                                         │
//! │  Terminal          Authenticator        /Register        Provider      │
//! │     │  login(u, p)       │                  │                │         │
//! │     │───────────────────►│ validate (local) │                │         │
//! │     │                    │  GET /Register   │                │         │
//! │     │                    │─────────────────►│                │         │
//! │     │                    │◄─────── users ───│                │         │
//! │     │                    │ match u + p      │                │         │
//! │     │                    │ current_location ────────────────►│         │
//! │     │                    │◄──────────────────────── coords ──│         │
//! │     │                    │ GET + PUT /Register/{id}          │         │
//! │     │                    │─────────────────►│                │         │
//! │     │                    │ SessionStore::save                │         │
//! │     │◄──── Session ──────│                  │                │         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session file is written last. Every earlier failure returns before
//! touching it, so a failed login never replaces or clears the session that
//! was already cached.

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::location::{LocationError, LocationProvider};
use crate::resource::UserClient;
use crate::session::{Session, SessionStore};
use tally_core::validation::validate_credentials;

/// Logs cashiers in and out of this terminal.
#[derive(Debug, Clone)]
pub struct Authenticator {
    users: UserClient,
    store: SessionStore,
}

impl Authenticator {
    pub fn new(client: &ApiClient, store: SessionStore) -> Self {
        Authenticator {
            users: client.users(),
            store,
        }
    }

    /// Runs the full login sequence and caches the resulting session.
    ///
    /// ## Errors
    /// - validation error if either field is blank (no request is sent)
    /// - [`ApiError::InvalidCredentials`] if no user matches
    /// - [`ApiError::LocationDenied`] if the provider refuses
    /// - network, status and session-file errors from the steps above
    pub async fn login<P>(&self, username: &str, password: &str, location: &P) -> ApiResult<Session>
    where
        P: LocationProvider + ?Sized,
    {
        validate_credentials(username, password)?;

        let users = self.users.list().await?;
        let user = users
            .into_iter()
            .find(|user| user.matches(username, password))
            .ok_or_else(|| {
                warn!(%username, "Login rejected");
                ApiError::InvalidCredentials
            })?;

        let coordinates = location.current_location().map_err(|e| match e {
            LocationError::PermissionDenied => {
                ApiError::LocationDenied("Location permission is required to log in".to_string())
            }
            LocationError::Unavailable(reason) => ApiError::LocationDenied(reason),
        })?;

        let mut user = self.users.append_location(&user.id, coordinates).await?;
        user.password.clear();

        let session = Session {
            user,
            location: coordinates,
        };
        self.store.save(&session)?;

        info!(user_id = %session.user.id, %username, "Logged in");
        Ok(session)
    }

    /// Forgets the cached session.
    pub fn logout(&self) -> ApiResult<()> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// The cached session, if any.
    pub fn current_session(&self) -> ApiResult<Option<Session>> {
        self.store.load()
    }
}
