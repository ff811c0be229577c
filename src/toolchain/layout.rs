//! Filesystem layout of the toolchain cache

use crate::config::ToolchainConfig;
use crate::error::{VasmupError, VasmupResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Lock file name inside the staging directory
const LOCK_FILE: &str = ".vasmup.lock";

/// Paths used during acquisition, all derived from the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainLayout {
    /// Working directory; the cached binary lives here
    pub work_dir: PathBuf,
    /// Cached assembler binary
    pub binary: PathBuf,
    /// Build workspace for the archive and the extracted source tree
    pub staging_dir: PathBuf,
    /// Downloaded source archive
    pub archive: PathBuf,
    /// Where `make` leaves the binary
    pub built_binary: PathBuf,
    /// Exclusive lock held while acquiring
    pub lock_path: PathBuf,
}

impl ToolchainLayout {
    pub fn new(work_dir: &Path, config: &ToolchainConfig) -> Self {
        let staging_dir = work_dir.join(&config.staging_dir);
        Self {
            work_dir: work_dir.to_path_buf(),
            binary: work_dir.join(&config.binary),
            archive: staging_dir.join(config.archive_name()),
            built_binary: staging_dir.join(&config.binary),
            lock_path: staging_dir.join(LOCK_FILE),
            staging_dir,
        }
    }

    /// Whether the assembler is already cached
    pub fn is_cached(&self) -> bool {
        let cached = self.binary.is_file();
        debug!("Toolchain {} cached: {}", self.binary.display(), cached);
        cached
    }

    /// Create the staging directory and its parents if absent
    pub async fn ensure_staging(&self) -> VasmupResult<()> {
        if self.staging_dir.is_dir() {
            return Ok(());
        }
        debug!("Creating build directory {}", self.staging_dir.display());
        fs::create_dir_all(&self.staging_dir).await.map_err(|e| {
            VasmupError::io(
                format!("creating build directory {}", self.staging_dir.display()),
                e,
            )
        })
    }
}
