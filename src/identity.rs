//! Anonymous Identity
//!
//! Client-generated user id persisted across runs in a small JSON
//! key/value file. The id is an explicit value handed to the services
//! that need it; nothing reads it from global state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

use crate::config::IdentityConfig;

/// Storage key holding the anonymous id
pub const USER_ID_KEY: &str = "llmbattler_user_id";

/// Anonymous user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Fresh random v4 UUID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Result<Self, IdentityError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentityError::Invalid("user id cannot be empty".to_string()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from the identity store
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt identity file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },

    #[error("Invalid identity: {0}")]
    Invalid(String),
}

/// Where the key/value pairs live
#[derive(Debug)]
enum Backing {
    File(PathBuf),
    /// Process-lifetime only
    Memory(Mutex<BTreeMap<String, String>>),
}

/// Persistent store for the anonymous user id
///
/// There is no cross-process locking: two processes generating an id at
/// the same time both write, and the last write wins.
#[derive(Debug)]
pub struct IdentityStore {
    backing: Backing,
}

impl IdentityStore {
    /// File-backed store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            backing: Backing::File(path.into()),
        }
    }

    /// In-memory store for contexts without a usable data directory
    pub fn ephemeral() -> Self {
        Self {
            backing: Backing::Memory(Mutex::new(BTreeMap::new())),
        }
    }

    /// Store at the configured (or platform default) location
    pub fn from_config(config: &IdentityConfig) -> Self {
        match config.resolved_path() {
            Some(path) => Self::open(path),
            None => {
                tracing::warn!("No data directory available, anonymous id will not persist");
                Self::ephemeral()
            }
        }
    }

    /// Whether ids survive the process
    pub fn is_persistent(&self) -> bool {
        matches!(self.backing, Backing::File(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(path) => Some(path),
            Backing::Memory(_) => None,
        }
    }

    /// Stored id, if any
    pub fn get(&self) -> Result<Option<UserId>, IdentityError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(USER_ID_KEY)
            .filter(|id| !id.trim().is_empty())
            .map(|id| UserId(id.clone())))
    }

    /// Stored id, generating and persisting one when absent
    pub fn get_or_create(&self) -> Result<UserId, IdentityError> {
        if let Some(id) = self.get()? {
            return Ok(id);
        }

        let id = UserId::generate();
        self.set(&id)?;
        tracing::info!(user_id = %id, persistent = self.is_persistent(), "Generated anonymous user id");
        Ok(id)
    }

    pub fn set(&self, id: &UserId) -> Result<(), IdentityError> {
        let mut entries = self.read_entries()?;
        entries.insert(USER_ID_KEY.to_string(), id.as_str().to_string());
        self.write_entries(entries)
    }

    pub fn clear(&self) -> Result<(), IdentityError> {
        let mut entries = self.read_entries()?;
        if entries.remove(USER_ID_KEY).is_some() {
            self.write_entries(entries)?;
        }
        Ok(())
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, IdentityError> {
        match &self.backing {
            Backing::Memory(entries) => Ok(entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()),
            Backing::File(path) => {
                let content = match std::fs::read_to_string(path) {
                    Ok(content) => content,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Ok(BTreeMap::new())
                    }
                    Err(e) => return Err(e.into()),
                };

                if content.trim().is_empty() {
                    return Ok(BTreeMap::new());
                }

                serde_json::from_str(&content).map_err(|e| IdentityError::Corrupt {
                    path: path.clone(),
                    error: e.to_string(),
                })
            }
        }
    }

    fn write_entries(&self, entries: BTreeMap<String, String>) -> Result<(), IdentityError> {
        match &self.backing {
            Backing::Memory(store) => {
                *store.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = entries;
                Ok(())
            }
            Backing::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                let content = serde_json::to_string_pretty(&entries).map_err(|e| {
                    IdentityError::Corrupt {
                        path: path.clone(),
                        error: e.to_string(),
                    }
                })?;

                // Replace atomically via a sibling tmp file
                let tmp = path.with_extension("json.tmp");
                std::fs::write(&tmp, content)?;
                std::fs::rename(&tmp, path)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generate_is_v4_uuid() {
        let id = UserId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_get_or_create_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let first = IdentityStore::open(&path).get_or_create().unwrap();
        let second = IdentityStore::open(&path).get_or_create().unwrap();

        assert_eq!(first, second);
        assert!(path.exists());

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get(USER_ID_KEY), Some(&first.to_string()));
    }

    #[test]
    fn test_set_and_clear() {
        let dir = tempdir().unwrap();
        let store = IdentityStore::open(dir.path().join("storage.json"));

        let id = UserId::new("fixed-user").unwrap();
        store.set(&id).unwrap();
        assert_eq!(store.get().unwrap(), Some(id));

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);

        let regenerated = store.get_or_create().unwrap();
        assert_ne!(regenerated.as_str(), "fixed-user");
    }

    #[test]
    fn test_other_keys_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = IdentityStore::open(&path);
        store.get_or_create().unwrap();
        store.clear().unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("theme").map(String::as_str), Some("dark"));
        assert!(!raw.contains_key(USER_ID_KEY));
    }

    #[test]
    fn test_corrupt_file_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let err = IdentityStore::open(&path).get_or_create().unwrap_err();
        assert!(matches!(err, IdentityError::Corrupt { .. }));
    }

    #[test]
    fn test_ephemeral_store() {
        let store = IdentityStore::ephemeral();
        assert!(!store.is_persistent());
        assert!(store.path().is_none());

        let id = store.get_or_create().unwrap();
        assert_eq!(store.get_or_create().unwrap(), id);
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(matches!(UserId::new("  "), Err(IdentityError::Invalid(_))));
    }
}
