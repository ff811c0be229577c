//! Runs the cached assembler against an input file
//!
//! Output naming and debug symbol emission are selected by
//! [`OutputNaming`] and [`DebugSymbols`]. Paths handed to the assembler are
//! relative to the working directory, which is also its cwd.

use crate::config::{AssemblerConfig, DebugSymbols, OutputNaming};
use crate::error::{VasmupError, VasmupResult};
use crate::process::{CommandSpec, ProcessRunner};
use crate::ui::{self, UiContext};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a successful assembly produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Debug symbol file, known only under [`DebugSymbols::AlwaysOn`]
    pub symbols: Option<PathBuf>,
    /// Whether the debug flag was passed to the assembler
    pub debug_requested: bool,
}

impl fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compiled '{}' to '{}'",
            self.input.display(),
            self.output.display()
        )?;
        match (&self.symbols, self.debug_requested) {
            (Some(symbols), _) => write!(f, " and debug symbols at '{}'", symbols.display()),
            (None, true) => write!(f, " with debug symbols"),
            (None, false) => Ok(()),
        }
    }
}

/// Output binary path for `input` under the configured naming policy
pub fn output_path(input: &Path, config: &AssemblerConfig) -> PathBuf {
    match config.output_naming {
        OutputNaming::FixedName => PathBuf::from(&config.output_name),
        OutputNaming::SuffixAppend => {
            let mut name = input.as_os_str().to_owned();
            name.push(&config.output_suffix);
            PathBuf::from(name)
        }
    }
}

/// Whether this run asks the assembler for debug symbols
pub fn debug_requested(config: &AssemblerConfig, debug_flag: bool) -> bool {
    match config.debug_symbols {
        DebugSymbols::AlwaysOn => true,
        DebugSymbols::FlagGated => debug_flag,
    }
}

/// Invokes the assembler binary
pub struct Assembler<'a> {
    binary: &'a Path,
    work_dir: &'a Path,
    config: &'a AssemblerConfig,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Assembler<'a> {
    pub fn new(
        binary: &'a Path,
        work_dir: &'a Path,
        config: &'a AssemblerConfig,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            binary,
            work_dir,
            config,
            runner,
        }
    }

    /// `<binary> -F<fmt> <directive> <input> -o <output> [<debug_flag>]`
    pub fn command(&self, input: &Path, debug_flag: bool) -> CommandSpec {
        let output = output_path(input, self.config);
        let mut spec = CommandSpec::new(self.binary.to_string_lossy(), self.work_dir)
            .arg(format!("-F{}", self.config.output_format))
            .arg(&self.config.directive_style)
            .arg(input.to_string_lossy())
            .arg("-o")
            .arg(output.to_string_lossy());
        if debug_requested(self.config, debug_flag) {
            spec = spec.arg(&self.config.debug_flag);
        }
        spec
    }

    /// Assemble `input`, failing if the assembler exits non-zero
    pub async fn assemble(
        &self,
        input: &Path,
        debug_flag: bool,
        ctx: &UiContext,
    ) -> VasmupResult<AssemblyReport> {
        let spec = self.command(input, debug_flag);
        info!("Assembling: {}", spec);

        let echo = ctx.clone();
        let output = self
            .runner
            .run(&spec, &move |line: String| ui::remark(&echo, &line))
            .await?;

        if !output.success() {
            return Err(VasmupError::Assemble {
                input: input.to_path_buf(),
                status: output.status_display(),
                output: output.tail(),
            });
        }

        Ok(AssemblyReport {
            input: input.to_path_buf(),
            output: output_path(input, self.config),
            symbols: self.symbols(),
            debug_requested: debug_requested(self.config, debug_flag),
        })
    }

    fn symbols(&self) -> Option<PathBuf> {
        if self.config.debug_symbols != DebugSymbols::AlwaysOn {
            return None;
        }
        let symbols = PathBuf::from(&self.config.symbols_file);
        if !self.work_dir.join(&symbols).is_file() {
            warn!("Assembler did not write {}", symbols.display());
            return None;
        }
        Some(symbols)
    }
}
