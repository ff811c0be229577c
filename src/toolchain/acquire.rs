//! Acquisition state machine: locate, confirm, fetch, build, install

use super::build;
use super::fetch::{self, format_bytes, ArchiveFetcher, FetchOutcome};
use super::gate::ConfirmGate;
use super::install;
use super::layout::ToolchainLayout;
use super::lock::AcquisitionLock;
use crate::config::ToolchainConfig;
use crate::error::VasmupResult;
use crate::process::ProcessRunner;
use crate::ui::{self, UiContext};
use tracing::{debug, info};

/// How the toolchain became available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// Binary was already cached
    CacheHit,
    /// Binary was built and installed by this run
    Installed,
    /// User declined the download and build
    Declined,
}

impl Acquisition {
    /// Whether the assembler can be invoked
    pub fn is_available(self) -> bool {
        !matches!(self, Self::Declined)
    }
}

/// Drives acquisition against injected fetch, process and confirmation seams
pub struct Acquirer<'a> {
    layout: &'a ToolchainLayout,
    config: &'a ToolchainConfig,
    fetcher: &'a dyn ArchiveFetcher,
    runner: &'a dyn ProcessRunner,
    gate: &'a dyn ConfirmGate,
    ctx: &'a UiContext,
}

impl<'a> Acquirer<'a> {
    pub fn new(
        layout: &'a ToolchainLayout,
        config: &'a ToolchainConfig,
        fetcher: &'a dyn ArchiveFetcher,
        runner: &'a dyn ProcessRunner,
        gate: &'a dyn ConfirmGate,
        ctx: &'a UiContext,
    ) -> Self {
        Self {
            layout,
            config,
            fetcher,
            runner,
            gate,
            ctx,
        }
    }

    /// Make the assembler available, building it on a cache miss
    pub async fn ensure(&self) -> VasmupResult<Acquisition> {
        if self.layout.is_cached() {
            debug!("Using cached {}", self.layout.binary.display());
            return Ok(Acquisition::CacheHit);
        }

        ui::step_warn(self.ctx, &format!("{} not found", self.config.binary));
        let question = format!(
            "Download and build {} from source?",
            self.config.binary
        );
        if !self.gate.confirm(&question).await? {
            info!("Build of {} declined", self.config.binary);
            return Ok(Acquisition::Declined);
        }

        self.layout.ensure_staging().await?;
        let _lock = AcquisitionLock::acquire(&self.layout.lock_path).await?;

        if self.layout.is_cached() {
            info!("{} was installed while waiting for the lock", self.config.binary);
            return Ok(Acquisition::CacheHit);
        }

        self.stage_archive().await?;
        build::extract(self.layout, self.config, self.runner, self.ctx).await?;
        build::build(self.layout, self.config, self.runner, self.ctx).await?;
        install::install(self.layout).await?;

        ui::step_ok(self.ctx, &format!("Installed {}", self.layout.binary.display()));
        Ok(Acquisition::Installed)
    }

    async fn stage_archive(&self) -> VasmupResult<()> {
        let mut spinner = ui::TaskSpinner::new(self.ctx);
        spinner.start(&format!("Fetching {}...", self.config.url));

        match fetch::ensure_archive(self.layout, &self.config.url, self.fetcher).await {
            Ok(FetchOutcome::Reused) => {
                spinner.stop(&format!("Reusing {}", self.layout.archive.display()));
                Ok(())
            }
            Ok(FetchOutcome::Downloaded { bytes }) => {
                spinner.stop(&format!(
                    "Downloaded {} ({})",
                    self.config.archive_name(),
                    format_bytes(bytes)
                ));
                Ok(())
            }
            Err(e) => {
                spinner.stop_error("Download failed");
                Err(e)
            }
        }
    }
}
