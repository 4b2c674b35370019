//! # Session Cache
//!
//! Remembers who is logged in on this terminal between runs.
//!
//! ## Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session File                                     │
//! │                                                                         │
//! │  <data dir>/session.json                                               │
//! │  {                                                                      │
//! │    "user":     { id, name, username, location[], ... },                │
//! │    "location": { latitude, longitude }   ← position at this login      │
//! │  }                                                                      │
//! │                                                                         │
//! │  save:  write session.json.tmp ──► rename over session.json            │
//! │  load:  missing file ──► None                                          │
//! │  clear: missing file ──► Ok                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rename makes a save all-or-nothing: a crash mid-write leaves the
//! previous session in place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::resource::User;
use tally_core::Coordinates;

const SESSION_FILE: &str = "session.json";

/// The logged-in cashier and where the device was at login.
///
/// The user record is stored without its password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub location: Coordinates,
}

/// File-backed store for a single [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    /// Store in the platform data directory.
    pub fn open_default() -> ApiResult<Self> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| ApiError::Session("No data directory available".to_string()))
    }

    /// `<platform data dir>/session.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "pos")
            .map(|dirs| dirs.data_dir().join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the stored session.
    pub fn save(&self, session: &Session) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error("create directory", e))?;
            }
        }

        let contents = serde_json::to_vec_pretty(session)
            .map_err(|e| ApiError::Session(format!("encode session: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|e| self.io_error("write", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error("rename", e))?;

        info!(path = ?self.path, user = %session.user.username, "Session saved");
        Ok(())
    }

    /// Reads the stored session, or `None` if nobody is logged in.
    pub fn load(&self) -> ApiResult<Option<Session>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No session file");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error("read", e)),
        };

        let session = serde_json::from_slice(&contents)
            .map_err(|e| ApiError::Session(format!("corrupt session file: {e}")))?;
        Ok(Some(session))
    }

    /// Forgets the stored session. Clearing an empty store is not an error.
    pub fn clear(&self) -> ApiResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = ?self.path, "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error("remove", e)),
        }
    }

    fn io_error(&self, action: &str, err: std::io::Error) -> ApiError {
        ApiError::Session(format!("{action} {}: {err}", self.path.display()))
    }
}
