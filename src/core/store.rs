//! Persistent presentation store
//!
//! All presentations live in one JSON object (id -> record) stored under a
//! single key of a [`StorageBackend`]. Every write rewrites the whole map.
//! A missing or unreadable map is treated as empty rather than as an error.
//! Entries that do not decode as a record are skipped when reading and kept
//! as-is when the map is written back.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

use super::presentation::{PresentationRecord, PresentationSummary};
use super::storage::{StorageBackend, StorageError};

/// Storage key holding the serialized presentation map
pub const STORAGE_KEY: &str = "slides-app-presentations";

/// Stored map with entries left undecoded
type RawMap = BTreeMap<String, serde_json::Value>;

/// Errors surfaced by store writes
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("presentation has no id")]
    MissingId,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialize presentations: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the stored presentation map
///
/// Clones share the backend and the write lock.
#[derive(Clone)]
pub struct PresentationStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
    /// Serializes the load-mutate-write cycle of `save` and `delete`
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for PresentationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl PresentationStore {
    /// Create a store over `backend` using the default key
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    /// Create a store over `backend` using a custom key
    pub fn with_key(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Insert or replace a presentation, stamping its last edit time
    ///
    /// Returns the record as stored.
    pub async fn save(
        &self,
        record: &PresentationRecord,
    ) -> Result<PresentationRecord, StoreError> {
        if record.id.trim().is_empty() {
            return Err(StoreError::MissingId);
        }

        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map();

        let stored = PresentationRecord {
            last_edited: Some(Utc::now()),
            ..record.clone()
        };
        map.insert(stored.id.clone(), serde_json::to_value(&stored)?);
        self.write_map(&map)?;

        tracing::info!("Saved presentation {} ({} stored)", stored.id, map.len());
        Ok(stored)
    }

    /// Load a single presentation
    pub async fn load(&self, id: &str) -> Option<PresentationRecord> {
        let record = self
            .read_map()
            .remove(id)
            .and_then(|value| decode_entry(id, value));
        tracing::debug!("Loaded presentation {}: found={}", id, record.is_some());
        record
    }

    /// List all presentations, most recently edited first
    pub async fn list(&self) -> Vec<PresentationSummary> {
        let mut listing: Vec<PresentationSummary> = self
            .read_map()
            .into_iter()
            .filter_map(|(id, value)| decode_entry(&id, value))
            .map(|record| record.summary())
            .collect();
        // `None` sorts below any timestamp, so never-saved entries go last
        listing.sort_by(|a, b| {
            b.last_edited
                .cmp(&a.last_edited)
                .then_with(|| a.id.cmp(&b.id))
        });
        listing
    }

    /// Remove a presentation; returns whether anything was removed
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map();

        if map.remove(id).is_none() {
            tracing::debug!("Delete of unknown presentation {} ignored", id);
            return Ok(false);
        }
        self.write_map(&map)?;

        tracing::info!("Deleted presentation {}", id);
        Ok(true)
    }

    fn read_map(&self) -> RawMap {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RawMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read presentations, treating as empty: {}", e);
                return RawMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Stored presentations are corrupt, treating as empty: {}", e);
            RawMap::new()
        })
    }

    fn write_map(&self, map: &RawMap) -> Result<(), StoreError> {
        let raw = serde_json::to_string(map)?;
        self.backend.set_item(&self.key, &raw)?;
        Ok(())
    }
}

fn decode_entry(id: &str, value: serde_json::Value) -> Option<PresentationRecord> {
    serde_json::from_value(value)
        .inspect_err(|e| tracing::warn!("Skipping unreadable presentation {}: {}", id, e))
        .ok()
}
