//! File-system persistence backend.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a sibling temp file that
//! is renamed over the target, so a crash mid-write leaves the previous
//! snapshot intact.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{PersistenceBackend, StorageError};

/// Backend that keeps one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`.
    ///
    /// The directory is created on first write if it does not exist.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the snapshot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve the file path for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if the key is empty or could escape
    /// the backend directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PersistenceBackend for FileBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &path)?;

        tracing::trace!(path = %path.display(), bytes = bytes.len(), "Snapshot written");
        Ok(())
    }
}
