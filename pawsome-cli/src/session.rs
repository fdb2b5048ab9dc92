//! Client state kept between invocations.
//!
//! ```text
//! ~/.local/share/pawsome/
//! └── session.json    # signed-in session and the selected dog
//! ```

use pawsome_core::Session;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

const SESSION_FILE: &str = "session.json";

/// Contents of `session.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SavedState {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub active_dog_id: Option<String>,
}

/// Reads and writes `session.json` in the data directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    data_dir: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    /// Loads the saved state. A missing file is an empty state.
    pub fn load(&self) -> Result<SavedState, SessionError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| SessionError::ParseError(path, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SavedState::default()),
            Err(e) => Err(SessionError::IoError(path, e)),
        }
    }

    /// Saves the state, creating the data directory if needed.
    pub fn save(&self, state: &SavedState) -> Result<(), SessionError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| SessionError::IoError(self.data_dir.clone(), e))?;

        let path = self.path();
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| SessionError::ParseError(path.clone(), e))?;
        fs::write(&path, json).map_err(|e| SessionError::IoError(path, e))?;
        Ok(())
    }

    /// Removes the saved state. Returns `Ok(false)` if there was none.
    pub fn clear(&self) -> Result<bool, SessionError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SessionError::IoError(path, e)),
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    IoError(PathBuf, io::Error),
    ParseError(PathBuf, serde_json::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::IoError(path, e) => {
                write!(f, "Failed to access session file '{}': {}", path.display(), e)
            }
            SessionError::ParseError(path, e) => {
                write!(f, "Invalid session file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pawsome_core::User;
    use tempfile::tempdir;

    fn session() -> Session {
        Session {
            access_token: "jwt".into(),
            refresh_token: "refresh".into(),
            expires_at: 1_700_000_000,
            user: User {
                id: "user-1".into(),
                email: Some("owner@example.com".into()),
            },
        }
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let temp_dir = tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path().join("data"));

        assert_eq!(store.load().unwrap(), SavedState::default());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path().join("data"));
        let state = SavedState {
            session: Some(session()),
            active_dog_id: Some("dog-2".into()),
        };

        store.save(&state).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), state);

        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().session.is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path().to_path_buf());
        fs::write(store.path(), "{not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Invalid session file"));
    }
}
