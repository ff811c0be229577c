//! CLI argument definitions using clap derive

use crate::config::{DebugSymbols, OutputNaming};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// vasmup - assemble 6502 sources with vasm
///
/// Downloads and builds vasm6502_oldstyle on first use, caches it in the
/// current directory, then assembles INPUT_PATH to a raw binary.
#[derive(Parser, Debug)]
#[command(name = "vasmup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path for the input 6502 assembly file
    #[arg(value_name = "INPUT_PATH")]
    pub input: PathBuf,

    /// Request a debug symbol file from the assembler
    #[arg(short, long)]
    pub debug: bool,

    /// Download and build without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Output naming policy (overrides config)
    #[arg(long, value_enum)]
    pub naming: Option<OutputNaming>,

    /// Debug symbol policy (overrides config)
    #[arg(long, value_enum)]
    pub symbols: Option<DebugSymbols>,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "VASMUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local vasmup.toml discovery
    #[arg(long)]
    pub no_local: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_input() {
        let cli = Cli::try_parse_from(["vasmup", "prog.asm"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("prog.asm"));
        assert!(!cli.debug);
        assert!(!cli.yes);
        assert!(cli.naming.is_none());
        assert!(cli.symbols.is_none());
    }

    #[test]
    fn cli_requires_input() {
        assert!(Cli::try_parse_from(["vasmup"]).is_err());
    }

    #[test]
    fn cli_parses_debug_flag() {
        let cli = Cli::try_parse_from(["vasmup", "-d", "prog.asm"]).unwrap();
        assert!(cli.debug);

        let cli = Cli::try_parse_from(["vasmup", "prog.asm", "--debug"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn cli_parses_policies() {
        let cli = Cli::try_parse_from([
            "vasmup",
            "--naming",
            "fixed-name",
            "--symbols",
            "always-on",
            "prog.asm",
        ])
        .unwrap();
        assert_eq!(cli.naming, Some(OutputNaming::FixedName));
        assert_eq!(cli.symbols, Some(DebugSymbols::AlwaysOn));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::try_parse_from(["vasmup", "-vv", "prog.asm"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
