use std::path::{Path, PathBuf};

use crate::core::errors::{Result, UselogError};
use crate::core::models::session::Session;
use crate::core::traits::session_store::SessionStore;

/// Session store that keeps the token in a small JSON file.
///
/// Example `session.json`:
/// ```text
/// {"access_token":"eyJhbGciOi...","saved_at":"2026-03-01T09:30:00Z"}
/// ```
#[derive(Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the file path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let session: Session =
            serde_json::from_str(&content).map_err(|e| UselogError::SessionError {
                detail: format!("Malformed session file {}: {e}", self.path.display()),
            })?;

        if session.access_token.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(session).map_err(|e| UselogError::SessionError {
            detail: format!("Failed to serialize session: {e}"),
        })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileSessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_not_logged_in() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let (_dir, store) = temp_store();
        let session = Session::new("tok-123");

        store.save(&session).unwrap();

        assert_eq!(store.load().unwrap(), Some(session));
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/uselog/session.json"));

        store.save(&Session::new("t")).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn blank_token_counts_as_logged_out() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), r#"{"access_token":"  "}"#).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(UselogError::SessionError { .. })
        ));
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, store) = temp_store();
        store.save(&Session::new("t")).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), None);
    }
}
