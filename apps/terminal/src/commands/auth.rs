//! # Auth Commands
//!
//! Login, logout and "who is at the till".

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CommandResult;
use crate::state::ConfigState;
use tally_api::{ApiClient, Authenticator, Session};

/// The logged-in cashier, without the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub user_id: String,
    pub name: String,
    pub username: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Logins recorded for this user, this one included.
    pub login_count: usize,
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        SessionDto {
            user_id: session.user.id.clone(),
            name: session.user.display_name().to_string(),
            username: session.user.username.clone(),
            latitude: session.location.latitude,
            longitude: session.location.longitude,
            login_count: session.user.location.len(),
        }
    }
}

fn authenticator(api: &ApiClient, config: &ConfigState) -> CommandResult<Authenticator> {
    Ok(Authenticator::new(api, config.session_store()?))
}

/// Logs in with the configured device location.
pub async fn login(
    api: &ApiClient,
    config: &ConfigState,
    username: &str,
    password: &str,
) -> CommandResult<SessionDto> {
    debug!(username = %username, "login command");

    let auth = authenticator(api, config)?;
    let location = config.location_provider();
    let session = auth.login(username, password, &*location).await?;
    Ok(SessionDto::from(&session))
}

pub fn logout(api: &ApiClient, config: &ConfigState) -> CommandResult<()> {
    debug!("logout command");
    authenticator(api, config)?.logout()?;
    Ok(())
}

/// The cached session, if someone is logged in.
pub fn whoami(api: &ApiClient, config: &ConfigState) -> CommandResult<Option<SessionDto>> {
    debug!("whoami command");
    let session = authenticator(api, config)?.current_session()?;
    Ok(session.as_ref().map(SessionDto::from))
}
