//! Source archive download
//!
//! An archive already present in the staging directory is always reused,
//! whatever its age or contents. Downloads go to `<archive>.part` and are
//! renamed into place only once complete.

use super::layout::ToolchainLayout;
use crate::error::{VasmupError, VasmupResult};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Downloads a URL to a file
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Download `url` to `dest`, returning the number of bytes written
    async fn fetch(&self, url: &str, dest: &Path) -> VasmupResult<u64>;
}

/// What [`ensure_archive`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Archive was already staged, no request made
    Reused,
    /// Archive was downloaded
    Downloaded { bytes: u64 },
}

/// Make sure the source archive is staged, downloading it only if absent
pub async fn ensure_archive(
    layout: &ToolchainLayout,
    url: &str,
    fetcher: &dyn ArchiveFetcher,
) -> VasmupResult<FetchOutcome> {
    layout.ensure_staging().await?;

    if layout.archive.is_file() {
        debug!("Archive {} already staged", layout.archive.display());
        return Ok(FetchOutcome::Reused);
    }

    info!("Downloading vasm source from {}", url);
    let bytes = fetcher.fetch(url, &layout.archive).await?;

    match short_digest(&layout.archive) {
        Ok(digest) => info!("Downloaded {} bytes, sha256 {}", bytes, digest),
        Err(e) => debug!("Could not hash {}: {}", layout.archive.display(), e),
    }

    Ok(FetchOutcome::Downloaded { bytes })
}

/// HTTP(S) fetcher backed by `ureq`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ArchiveFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> VasmupResult<u64> {
        let url = url.to_string();
        let dest = dest.to_path_buf();
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || download(&url, &dest, timeout))
            .await
            .map_err(|e| VasmupError::Internal(format!("Download task failed: {}", e)))?
    }
}

fn download(url: &str, dest: &Path, timeout: Duration) -> VasmupResult<u64> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into();

    let response = agent.get(url).call().map_err(|e| VasmupError::fetch(url, e))?;
    let mut reader = response.into_body().into_reader();

    let partial = partial_path(dest);
    let written = write_partial(&mut reader, &partial).map_err(|e| {
        let _ = fs::remove_file(&partial);
        VasmupError::fetch(url, e)
    })?;

    fs::rename(&partial, dest)
        .map_err(|e| VasmupError::io(format!("moving download to {}", dest.display()), e))?;

    Ok(written)
}

fn write_partial(reader: &mut impl Read, partial: &Path) -> io::Result<u64> {
    let mut file = File::create(partial)?;
    let written = io::copy(reader, &mut file)?;
    file.sync_all()?;
    Ok(written)
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// SHA256 of a file, first 12 hex chars
fn short_digest(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    let result = hasher.finalize();
    Ok(hex::encode(&result[..6]))
}

/// Format bytes as human-readable size (e.g., "1.5 MB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
