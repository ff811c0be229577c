//! Exclusive lock around acquisition
//!
//! Two vasmup processes in the same working directory would otherwise
//! extract and build into the same staging directory at once.

use crate::error::{VasmupError, VasmupResult};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Held for the duration of acquisition; released on drop
#[derive(Debug)]
pub struct AcquisitionLock {
    _file: File,
    path: PathBuf,
}

impl AcquisitionLock {
    /// Block until the lock at `path` is ours
    pub async fn acquire(path: &Path) -> VasmupResult<Self> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::acquire_blocking(path))
            .await
            .map_err(|e| VasmupError::Internal(format!("Lock task failed: {}", e)))?
    }

    fn acquire_blocking(path: PathBuf) -> VasmupResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| VasmupError::Lock {
                path: path.clone(),
                source,
            })?;

        debug!("Waiting for lock {}", path.display());
        file.lock_exclusive().map_err(|source| VasmupError::Lock {
            path: path.clone(),
            source,
        })?;
        debug!("Acquired lock {}", path.display());

        Ok(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lock_is_exclusive_until_dropped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".vasmup.lock");

        let held = AcquisitionLock::acquire(&path).await.unwrap();
        assert_eq!(held.path(), path);

        let contended =
            tokio::time::timeout(Duration::from_millis(200), AcquisitionLock::acquire(&path)).await;
        assert!(contended.is_err());

        drop(held);
        let again = AcquisitionLock::acquire(&path).await.unwrap();
        drop(again);
    }

    #[tokio::test]
    async fn lock_in_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent").join(".vasmup.lock");

        let err = AcquisitionLock::acquire(&path).await.unwrap_err();
        assert!(matches!(err, VasmupError::Lock { .. }));
    }
}
