//! Persisted session slot
//!
//! One session exists per device at a time. It lives in a single JSON file
//! (`{data_dir}/session.json`); logging in overwrites the slot, logging out
//! clears it. A slot that cannot be parsed is treated as absent rather than
//! surfaced, so a corrupted file never locks the user out of the login
//! screen.

use shared::models::Session;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Single-slot session store: in-memory current session plus its file copy
pub struct SessionStore {
    /// Slot path: {data_dir}/session.json
    file_path: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Open the store, restoring a previously persisted session if one
    /// exists and still parses.
    pub fn open(data_dir: &Path) -> Self {
        let file_path = data_dir.join("session.json");

        let current = if file_path.exists() {
            match std::fs::read_to_string(&file_path)
                .map_err(SessionError::from)
                .and_then(|content| Ok(serde_json::from_str::<Session>(&content)?))
            {
                Ok(session) => {
                    tracing::info!(email = %session.user.email, "Restored persisted session");
                    Some(session)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Session slot unreadable, treating as absent");
                    let _ = std::fs::remove_file(&file_path);
                    None
                }
            }
        } else {
            None
        };

        Self {
            file_path,
            current: RwLock::new(current),
        }
    }

    /// The active session, if any
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a session is active process-wide
    pub fn is_active(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The bearer credential of the active session
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// Activate a session: overwrite the slot on disk and in memory.
    /// Previous contents are replaced, not merged.
    pub fn activate(&self, session: Session) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.file_path, content)?;

        tracing::debug!(email = %session.user.email, "Session activated");
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Clear the slot on logout
    pub fn clear(&self) -> Result<(), SessionError> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
        }
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Role, UserInfo};

    fn session() -> Session {
        Session {
            token: "tok-123".to_string(),
            user: UserInfo {
                id: "7".to_string(),
                email: "maria@example.com".to_string(),
                name: "María".to_string(),
                role: Role::Seller,
            },
        }
    }

    #[test]
    fn test_activate_and_restore() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::open(dir.path());
        assert!(!store.is_active());

        store.activate(session()).unwrap();
        assert!(store.is_active());
        assert_eq!(store.token().as_deref(), Some("tok-123"));

        // A fresh store over the same directory restores the slot
        let restored = SessionStore::open(dir.path());
        assert_eq!(restored.current().unwrap(), session());
    }

    #[test]
    fn test_activate_overwrites_previous_slot() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::open(dir.path());
        store.activate(session()).unwrap();

        let mut second = session();
        second.token = "tok-456".to_string();
        store.activate(second).unwrap();

        assert_eq!(store.token().as_deref(), Some("tok-456"));
        let restored = SessionStore::open(dir.path());
        assert_eq!(restored.token().as_deref(), Some("tok-456"));
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::open(dir.path());
        store.activate(session()).unwrap();
        store.clear().unwrap();

        assert!(!store.is_active());
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn test_corrupt_slot_treated_as_absent() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("session.json"), "{not valid json").unwrap();

        let store = SessionStore::open(dir.path());
        assert!(!store.is_active());
        // The unreadable file is gone; the next login writes a fresh slot
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn test_clear_without_slot_is_ok() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::open(dir.path());
        store.clear().unwrap();
    }
}
