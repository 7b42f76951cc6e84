//! Key-value storage backends
//!
//! A backend is a flat string-to-string map in the spirit of browser local
//! storage. The presentation store keeps its whole serialized map under a
//! single key of whichever backend it is given.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Synchronous string key-value storage
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage, used in tests and as a scratch backend
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// File that holds the value for `key`
    pub fn item_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        // Write to a sibling and rename so readers never see a partial file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Wrote storage item {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("data")).unwrap();
        storage.set_item("slides-app-presentations", "{}").unwrap();

        let reopened = FileStorage::open(dir.path().join("data")).unwrap();
        assert_eq!(
            reopened.get_item("slides-app-presentations").unwrap().as_deref(),
            Some("{}")
        );
        assert!(dir.path().join("data/slides-app-presentations.json").exists());
        assert!(!dir.path().join("data/slides-app-presentations.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get_item("absent").unwrap(), None);
        storage.remove_item("absent").unwrap();
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.get_item(""), Err(StorageError::InvalidKey(_))));
    }
}
