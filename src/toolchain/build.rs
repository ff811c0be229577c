//! Archive extraction and the native `make` build

use super::layout::ToolchainLayout;
use crate::config::{ArchiveFormat, ToolchainConfig};
use crate::error::{VasmupError, VasmupResult};
use crate::process::{CommandSpec, ProcessRunner};
use crate::ui::{BuildProgress, TaskSpinner, UiContext};
use tracing::{debug, info};

/// Extraction command for the staged archive
///
/// Runs in the working directory: the archive's top-level directory is the
/// staging directory itself.
pub fn extract_command(layout: &ToolchainLayout, format: ArchiveFormat) -> CommandSpec {
    let archive = layout.archive.to_string_lossy().into_owned();
    match format {
        ArchiveFormat::Zip => CommandSpec::new("unzip", &layout.work_dir)
            .arg("-o")
            .arg("-q")
            .arg(archive),
        ArchiveFormat::TarGz => CommandSpec::new("tar", &layout.work_dir)
            .arg("-xzf")
            .arg(archive),
    }
}

/// `make CPU=<cpu> SYNTAX=<syntax> -C <staging>`
pub fn build_command(layout: &ToolchainLayout, config: &ToolchainConfig) -> CommandSpec {
    CommandSpec::new(&config.make, &layout.work_dir)
        .arg(format!("CPU={}", config.cpu))
        .arg(format!("SYNTAX={}", config.syntax))
        .arg("-C")
        .arg(layout.staging_dir.to_string_lossy().into_owned())
}

/// Extract the staged archive in place
pub async fn extract(
    layout: &ToolchainLayout,
    config: &ToolchainConfig,
    runner: &dyn ProcessRunner,
    ctx: &UiContext,
) -> VasmupResult<()> {
    let spec = extract_command(layout, config.format);
    let archive = config.archive_name();
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start(&format!("Extracting {}...", archive));

    let output = match runner.run(&spec, &|line: String| debug!("{}", line)).await {
        Ok(output) => output,
        Err(e) => {
            spinner.stop_error(&format!("Could not run {}", spec.program));
            return Err(e);
        }
    };
    if !output.success() {
        spinner.stop_error(&format!("Extracting {} failed", archive));
        return Err(VasmupError::Extract {
            command: spec.to_string(),
            status: output.status_display(),
            output: output.tail(),
        });
    }

    spinner.stop(&format!("Extracted {}", archive));
    Ok(())
}

/// Build the assembler inside the staging directory
pub async fn build(
    layout: &ToolchainLayout,
    config: &ToolchainConfig,
    runner: &dyn ProcessRunner,
    ctx: &UiContext,
) -> VasmupResult<()> {
    let spec = build_command(layout, config);
    info!("Building {} with: {}", config.binary, spec);

    let progress = BuildProgress::new(ctx, &config.binary);
    let output = runner
        .run(&spec, &|line: String| {
            debug!("{}", line);
            progress.on_line(&line);
        })
        .await;
    progress.finish();

    let output = output?;
    if !output.success() {
        return Err(VasmupError::Build {
            command: spec.to_string(),
            status: output.status_display(),
            output: output.tail(),
        });
    }
    Ok(())
}
