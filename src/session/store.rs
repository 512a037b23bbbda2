use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::AdminProfile;
use crate::session::credentials::SecureString;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted login state: the auth token and the cached admin profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SecureString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AdminProfile>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data_dir>/fleetdesk/session.json`, falling back to the current directory.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("fleetdesk").join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means logged out.
    pub fn load(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let content = serde_json::to_string_pretty(session).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        restrict_permissions(&self.path).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Replace only the cached profile, keeping the token.
    pub fn cache_profile(&self, profile: AdminProfile) -> Result<Session, SessionError> {
        let mut session = self.load()?;
        session.profile = Some(profile);
        self.save(&session)?;
        Ok(session)
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
