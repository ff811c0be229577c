//! Assemble command - acquire the toolchain if needed, then run it

use crate::config::Config;
use crate::error::{VasmupError, VasmupResult};
use crate::invoke::Assembler;
use crate::process::SystemRunner;
use crate::toolchain::{Acquirer, HttpFetcher, PromptGate, ToolchainLayout};
use crate::ui::{self, UiContext};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::args::Cli;

/// Execute the assemble flow in `work_dir`
pub async fn execute(args: &Cli, mut config: Config, work_dir: &Path) -> VasmupResult<()> {
    if let Some(naming) = args.naming {
        config.assembler.output_naming = naming;
    }
    if let Some(symbols) = args.symbols {
        config.assembler.debug_symbols = symbols;
    }

    if !work_dir.join(&args.input).is_file() {
        return Err(VasmupError::InputNotFound(args.input.clone()));
    }

    let ctx = UiContext::detect().with_auto_yes(args.yes);
    let layout = ToolchainLayout::new(work_dir, &config.toolchain);
    let fetcher = HttpFetcher::new(Duration::from_secs(config.toolchain.download_timeout_secs));
    let gate = PromptGate::new(&ctx);
    let runner = SystemRunner;

    let acquisition = Acquirer::new(&layout, &config.toolchain, &fetcher, &runner, &gate, &ctx)
        .ensure()
        .await?;
    debug!("Toolchain acquisition: {:?}", acquisition);

    if !acquisition.is_available() {
        ui::step_info(&ctx, "Nothing assembled");
        return Ok(());
    }

    let report = Assembler::new(&layout.binary, work_dir, &config.assembler, &runner)
        .assemble(&args.input, args.debug, &ctx)
        .await?;

    ui::step_ok(&ctx, &report.to_string());
    Ok(())
}
