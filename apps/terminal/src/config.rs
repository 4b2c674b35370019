//! # Terminal Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_API_URL=https://…/api/v1                                     │
//! │     TALLY_LATITUDE=10.77  TALLY_LONGITUDE=106.70                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/tally-pos/tally.toml (Linux)                             │
//! │     ~/Library/Application Support/com.tally.pos/tally.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     hosted backend, 15 s timeout, 7-day window, no location            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tally.toml
//! [api]
//! base_url = "https://67a28947409de5ed5255aeed.mockapi.io/api/v1"
//! request_timeout_secs = 15
//!
//! [stats]
//! daily_window_days = 7
//!
//! [device]
//! latitude = 10.7769
//! longitude = 106.7009
//! location_denied = false
//!
//! [session]
//! path = "/var/lib/tally/session.json"
//!
//! [store]
//! name = "Corner Café"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use tally_api::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use tally_core::validation::{validate_coordinates, validate_window_days};
use tally_core::{Coordinates, DEFAULT_WINDOW_DAYS};

const CONFIG_FILE: &str = "tally.toml";

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[api]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

/// `[stats]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSettings {
    /// Length of the daily revenue chart when no `--days` is given.
    pub daily_window_days: u32,
}

impl Default for StatsSettings {
    fn default() -> Self {
        StatsSettings {
            daily_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// `[device]`
///
/// The terminal has no positioning hardware; the position reported at login
/// comes from here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Behave as if location permission was refused.
    pub location_denied: bool,
}

impl DeviceSettings {
    /// Both coordinates, if both are configured.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// `[session]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Overrides the platform data directory.
    pub path: Option<PathBuf>,
}

/// `[store]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Printed at the top of receipts.
    pub name: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Tally POS".to_string(),
        }
    }
}

// =============================================================================
// Terminal Config
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub stats: StatsSettings,

    #[serde(default)]
    pub device: DeviceSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

impl TerminalConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `tally.toml` in the config dir)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading terminal config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.request_timeout_secs must be greater than 0".into(),
            ));
        }

        validate_window_days(self.stats.daily_window_days)
            .map_err(|e| ConfigError::Invalid(format!("stats: {e}")))?;

        match (self.device.latitude, self.device.longitude) {
            (Some(_), None) | (None, Some(_)) => {
                return Err(ConfigError::Invalid(
                    "device.latitude and device.longitude must be set together".into(),
                ));
            }
            _ => {}
        }
        if let Some(coordinates) = self.device.coordinates() {
            validate_coordinates(&coordinates)
                .map_err(|e| ConfigError::Invalid(format!("device: {e}")))?;
        }

        Ok(())
    }

    /// Applies `TALLY_*` overrides read through `lookup`.
    ///
    /// Values that do not parse are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TALLY_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("TALLY_REQUEST_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring invalid TALLY_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("TALLY_SESSION_PATH") {
            self.session.path = Some(PathBuf::from(path));
        }

        if let Some(latitude) = lookup("TALLY_LATITUDE") {
            match latitude.parse::<f64>() {
                Ok(value) => self.device.latitude = Some(value),
                Err(_) => warn!(value = %latitude, "Ignoring invalid TALLY_LATITUDE"),
            }
        }

        if let Some(longitude) = lookup("TALLY_LONGITUDE") {
            match longitude.parse::<f64>() {
                Ok(value) => self.device.longitude = Some(value),
                Err(_) => warn!(value = %longitude, "Ignoring invalid TALLY_LONGITUDE"),
            }
        }

        if let Some(name) = lookup("TALLY_STORE_NAME") {
            self.store.name = name;
        }
    }

    /// `tally.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Settings for [`tally_api::ApiClient::new`].
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.clone())
            .request_timeout(Duration::from_secs(self.api.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = TerminalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.stats.daily_window_days, 7);
        assert_eq!(config.device.coordinates(), None);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: TerminalConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:3000"

            [device]
            latitude = 10.5
            longitude = 106.25
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.device.coordinates(), Some(Coordinates::new(10.5, 106.25)));
        assert_eq!(config.store.name, "Tally POS");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = TerminalConfig::default();
        config.apply_overrides(env(&[
            ("TALLY_API_URL", "http://127.0.0.1:9000"),
            ("TALLY_REQUEST_TIMEOUT_SECS", "3"),
            ("TALLY_LATITUDE", "1.5"),
            ("TALLY_LONGITUDE", "oops"),
            ("TALLY_STORE_NAME", "Night Market"),
        ]));

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.request_timeout_secs, 3);
        assert_eq!(config.device.latitude, Some(1.5));
        assert_eq!(config.device.longitude, None);
        assert_eq!(config.store.name, "Night Market");
    }

    #[test]
    fn test_validation_failures() {
        let mut config = TerminalConfig::default();
        config.stats.daily_window_days = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = TerminalConfig::default();
        config.device.latitude = Some(10.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = TerminalConfig::default();
        config.device.latitude = Some(100.0);
        config.device.longitude = Some(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "[stats]\ndaily_window_days = 30\n").unwrap();

        let config = TerminalConfig::from_file(&path).unwrap();
        assert_eq!(config.stats.daily_window_days, 30);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            TerminalConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));
    }
}
