//! Configuration management for vasmup

pub mod schema;

pub use schema::{ArchiveFormat, AssemblerConfig, Config, DebugSymbols, OutputNaming, ToolchainConfig};

use crate::error::{VasmupError, VasmupResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = "vasmup.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
    explicit: bool,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            explicit: false,
        }
    }

    /// Create a config manager with a custom path; the file must exist
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            explicit: true,
        }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vasmup")
            .join("config.toml")
    }

    /// Walk up from `start` looking for a project-local config file
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration, falling back to defaults if the global file is absent
    pub async fn load(&self) -> VasmupResult<Config> {
        let value = self.load_base_value().await?;
        Self::from_value(value, &self.config_path)
    }

    /// Load configuration with a project-local file layered on top
    pub async fn load_merged(&self, local: Option<&Path>) -> VasmupResult<Config> {
        let mut value = self.load_base_value().await?;

        let Some(local) = local else {
            return Self::from_value(value, &self.config_path);
        };

        debug!("Merging local config {}", local.display());
        let overlay = Self::read_value(local).await?;
        merge_values(&mut value, overlay);
        Self::from_value(value, local)
    }

    async fn load_base_value(&self) -> VasmupResult<toml::Value> {
        if self.config_path.exists() {
            return Self::read_value(&self.config_path).await;
        }
        if self.explicit {
            return Err(VasmupError::ConfigNotFound(self.config_path.clone()));
        }
        debug!("Config file not found, using defaults");
        Ok(toml::Value::Table(toml::Table::new()))
    }

    async fn read_value(path: &Path) -> VasmupResult<toml::Value> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| VasmupError::io(format!("reading config from {}", path.display()), e))?;

        content
            .parse::<toml::Table>()
            .map(toml::Value::Table)
            .map_err(|e| VasmupError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    fn from_value(value: toml::Value, path: &Path) -> VasmupResult<Config> {
        value.try_into().map_err(|e: toml::de::Error| VasmupError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively merge `overlay` into `base`; tables merge, other values replace
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager {
            config_path: temp.path().join("nonexistent.toml"),
            explicit: false,
        };

        let config = manager.load().await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("missing.toml"));

        let err = manager.load().await.unwrap_err();
        assert!(matches!(err, VasmupError::ConfigNotFound(_)));
    }

    #[tokio::test]
    async fn invalid_toml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[toolchain\n").unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        match err {
            VasmupError::ConfigInvalid { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn local_config_overrides_single_keys() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("config.toml");
        std::fs::write(&global, "[toolchain]\ncpu = \"65c02\"\nmake = \"gmake\"\n").unwrap();
        let local = temp.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&local, "[toolchain]\nmake = \"bmake\"\n").unwrap();

        let config = ConfigManager::with_path(global)
            .load_merged(Some(&local))
            .await
            .unwrap();

        assert_eq!(config.toolchain.cpu, "65c02");
        assert_eq!(config.toolchain.make, "bmake");
        assert_eq!(config.toolchain.syntax, "oldstyle");
    }

    #[test]
    fn find_local_config_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("src").join("asm");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(LOCAL_CONFIG_FILE), "").unwrap();

        let found = ConfigManager::find_local_config(&nested).unwrap();
        assert_eq!(found, temp.path().join(LOCAL_CONFIG_FILE));
    }
}
