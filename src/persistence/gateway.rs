//! Snapshot persistence under a fixed key.

use tracing::{debug, warn};

use super::storage::Storage;
use crate::core::error::StorageError;
use crate::session::PersistedSnapshot;

/// Saves, loads, and clears the in-progress snapshot.
///
/// ## Usage
///
/// ```
/// use timeline_engine::persistence::{MemoryStorage, PersistenceGateway, Storage};
///
/// let mut gateway = PersistenceGateway::new(MemoryStorage::new(), "saved-game");
/// assert!(gateway.load().is_none());
///
/// gateway.storage_mut().set_item("saved-game", "{ broken").unwrap();
/// assert!(gateway.load().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct PersistenceGateway<S> {
    storage: S,
    key: String,
}

impl<S: Storage> PersistenceGateway<S> {
    /// Persist snapshots in `storage` under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored snapshot.
    pub fn save(&mut self, snapshot: &PersistedSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string(snapshot)?;
        self.storage.set_item(&self.key, &json)?;
        debug!(key = %self.key, score = snapshot.score, "snapshot saved");
        Ok(())
    }

    /// Read the stored snapshot.
    ///
    /// Missing, unreadable, and malformed values all come back as `None`.
    #[must_use]
    pub fn load(&self) -> Option<PersistedSnapshot> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read snapshot");
                return None;
            }
        };

        let snapshot = PersistedSnapshot::from_json(&raw);
        if snapshot.is_none() {
            warn!(key = %self.key, "discarding malformed snapshot");
        }
        snapshot
    }

    /// Remove the stored snapshot.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)?;
        debug!(key = %self.key, "snapshot cleared");
        Ok(())
    }

    /// Borrow the backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutably borrow the backend.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give back the backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
