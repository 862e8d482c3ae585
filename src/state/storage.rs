//! Session storage implementation
//!
//! This module handles persistence of the session user between runs,
//! including serialization, corruption handling and cleanup.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};
use crate::models::SessionUser;
use crate::utils::errors::{AdminError, Result};

/// Backing store for the session user
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<SessionUser>>;
    fn save(&self, user: &SessionUser) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON file holding the session user
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<SessionUser>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No persisted session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<SessionUser>(&data) {
            Ok(user) => {
                debug!(path = %self.path.display(), "Session loaded from disk");
                Ok(Some(user))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupted session file");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn save(&self, user: &SessionUser) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, serialized)?;
        debug!(path = %self.path.display(), "Session saved to disk");
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

/// In-process storage, lost when the program exits
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    user: Mutex<Option<SessionUser>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<SessionUser>>> {
        self.user
            .lock()
            .map_err(|_| AdminError::InvalidInput("session storage lock poisoned".to_string()))
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<SessionUser>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, user: &SessionUser) -> Result<()> {
        *self.slot()? = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        serde_json::from_value(serde_json::json!({"id": 3, "user_id": "4455", "is_admin": true})).unwrap()
    }

    #[test]
    fn test_file_storage_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested/session.json"));

        assert!(storage.load().unwrap().is_none());
        storage.save(&user()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(user()));

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        storage.clear().unwrap();
    }

    #[test]
    fn test_corrupted_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileSessionStorage::new(&path);
        assert!(storage.load().unwrap().is_none());
        assert!(!path.exists());
    }
}
