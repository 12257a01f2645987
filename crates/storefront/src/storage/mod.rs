//! Persistence backends for the cart snapshot.
//!
//! A backend stores opaque blobs under a fixed key. Reads happen once per
//! session during hydration and are asynchronous; writes mirror every cart
//! mutation and are synchronous so a mutation never suspends.
//!
//! # Backends
//!
//! - [`MemoryBackend`] - process-local map, shared between clones
//! - [`FileBackend`] - one `<key>.json` file per key inside a directory

use std::future::Future;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be mapped onto the backend's namespace.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable get/set of a named blob.
///
/// `load` after a successful `save(key, bytes)` must return exactly `bytes`.
/// A missing key is `Ok(None)`, which callers read as "no prior state".
pub trait PersistenceBackend: Send + Sync {
    /// Read the blob stored under `key`.
    fn load(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, StorageError>> + Send;

    /// Replace the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write could not be made durable.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}
