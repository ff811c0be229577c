//! Moves the freshly built binary into the working-directory cache

use super::layout::ToolchainLayout;
use crate::error::{VasmupError, VasmupResult};
use tokio::fs;
use tracing::info;

/// Relocate `built_binary` to `binary` and mark it executable
pub async fn install(layout: &ToolchainLayout) -> VasmupResult<()> {
    if !layout.built_binary.is_file() {
        return Err(VasmupError::BinaryMissing {
            path: layout.built_binary.clone(),
        });
    }

    fs::rename(&layout.built_binary, &layout.binary)
        .await
        .map_err(|source| VasmupError::Install {
            from: layout.built_binary.clone(),
            to: layout.binary.clone(),
            source,
        })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o755);
        fs::set_permissions(&layout.binary, perms)
            .await
            .map_err(|e| VasmupError::io(format!("marking {} executable", layout.binary.display()), e))?;
    }

    info!("Installed {}", layout.binary.display());
    Ok(())
}
