//! In-memory persistence backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{PersistenceBackend, StorageError};

/// Process-local backend.
///
/// Clones share the same underlying map, which makes it possible to open
/// several stores over one "device" in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob directly, bypassing any store.
    pub fn insert(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.blobs().insert(key.into(), bytes.into());
    }

    /// Return a copy of the blob stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs().get(key).cloned()
    }

    /// Drop the blob stored under `key`, as an external purge would.
    pub fn purge(&self, key: &str) {
        self.blobs().remove(key);
    }

    fn blobs(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PersistenceBackend for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.blobs().insert(key.to_owned(), bytes.to_vec());
        Ok(())
    }
}
