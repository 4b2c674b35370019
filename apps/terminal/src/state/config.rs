//! # Configuration State
//!
//! Read-only view of the loaded [`TerminalConfig`], with the device
//! collaborators it implies.

use std::sync::Arc;

use tally_api::{
    ApiError, ApiResult, DeniedLocation, FixedLocation, LocationProvider, SessionStore,
};
use tracing::warn;

use crate::config::TerminalConfig;

#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    config: Arc<TerminalConfig>,
}

impl ConfigState {
    pub fn new(config: TerminalConfig) -> Self {
        ConfigState {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Printed at the top of receipts.
    pub fn store_name(&self) -> &str {
        &self.config.store.name
    }

    pub fn daily_window_days(&self) -> u32 {
        self.config.stats.daily_window_days
    }

    /// The location source used at login.
    ///
    /// With no configured position the terminal behaves like a device that
    /// refused permission.
    pub fn location_provider(&self) -> Box<dyn LocationProvider + Send + Sync> {
        let device = &self.config.device;
        if device.location_denied {
            return Box::new(DeniedLocation);
        }
        match device.coordinates() {
            Some(coordinates) => Box::new(FixedLocation::new(coordinates)),
            None => {
                warn!("No device location configured; login will be refused");
                Box::new(DeniedLocation)
            }
        }
    }

    /// The session cache at the configured or platform default path.
    pub fn session_store(&self) -> ApiResult<SessionStore> {
        match &self.config.session.path {
            Some(path) => Ok(SessionStore::new(path.clone())),
            None => SessionStore::open_default().map_err(|e| {
                ApiError::Session(format!("{e}; set [session] path in tally.toml"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_api::LocationError;
    use tally_core::Coordinates;

    #[test]
    fn test_location_provider_from_config() {
        let mut config = TerminalConfig::default();
        config.device.latitude = Some(10.5);
        config.device.longitude = Some(106.25);
        let state = ConfigState::new(config.clone());
        assert_eq!(
            state.location_provider().current_location(),
            Ok(Coordinates::new(10.5, 106.25))
        );

        config.device.location_denied = true;
        let state = ConfigState::new(config);
        assert_eq!(
            state.location_provider().current_location(),
            Err(LocationError::PermissionDenied)
        );
    }

    #[test]
    fn test_unconfigured_location_is_denied() {
        let state = ConfigState::new(TerminalConfig::default());
        assert_eq!(
            state.location_provider().current_location(),
            Err(LocationError::PermissionDenied)
        );
    }

    #[test]
    fn test_session_path_override() {
        let mut config = TerminalConfig::default();
        config.session.path = Some("/tmp/tally-test/session.json".into());
        let store = ConfigState::new(config).session_store().unwrap();
        assert_eq!(store.path().to_str(), Some("/tmp/tally-test/session.json"));
    }
}
