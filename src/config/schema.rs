//! Configuration schema for vasmup
//!
//! Global configuration is stored at `~/.config/vasmup/config.toml`;
//! a project-local `vasmup.toml` overrides individual keys.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the assembler comes from and how it is built
    pub toolchain: ToolchainConfig,

    /// How the assembler is invoked
    pub assembler: AssemblerConfig,
}

/// Compression scheme of the source archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    /// `.zip`, extracted with `unzip`
    Zip,
    /// `.tar.gz`, extracted with `tar`
    TarGz,
}

impl ArchiveFormat {
    /// Archive file name used when `archive` is not set
    pub fn default_archive_name(self) -> &'static str {
        match self {
            Self::Zip => "vasm.zip",
            Self::TarGz => "vasm.tar.gz",
        }
    }
}

/// Toolchain acquisition settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Binary name, looked up in the working directory
    pub binary: String,

    /// Staging directory for the archive and the source tree
    pub staging_dir: String,

    /// Archive file name inside the staging directory; follows `format` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,

    /// Source archive URL
    pub url: String,

    /// Archive compression scheme
    pub format: ArchiveFormat,

    /// vasm `CPU=` build parameter
    pub cpu: String,

    /// vasm `SYNTAX=` build parameter
    pub syntax: String,

    /// Make program
    pub make: String,

    /// Download timeout in seconds
    pub download_timeout_secs: u64,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            binary: "vasm6502_oldstyle".to_string(),
            staging_dir: "vasm-main".to_string(),
            archive: None,
            url: "https://codeload.github.com/ArchUsr64/vasm/zip/refs/heads/main".to_string(),
            format: ArchiveFormat::Zip,
            cpu: "6502".to_string(),
            syntax: "oldstyle".to_string(),
            make: "make".to_string(),
            download_timeout_secs: 300,
        }
    }
}

impl ToolchainConfig {
    /// Archive file name, defaulting to the one matching `format`
    pub fn archive_name(&self) -> String {
        self.archive
            .clone()
            .unwrap_or_else(|| self.format.default_archive_name().to_string())
    }
}

/// How the output binary is named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputNaming {
    /// Always `output_name` in the working directory
    FixedName,
    /// `<INPUT_PATH>` followed by `output_suffix`
    SuffixAppend,
}

/// When debug symbols are requested from the assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DebugSymbols {
    /// On every run, written to `symbols_file`
    AlwaysOn,
    /// Only when `--debug` is passed
    FlagGated,
}

/// Assembler invocation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Output module format, passed as `-F<format>`
    pub output_format: String,

    /// Directive style flag
    pub directive_style: String,

    /// Output naming policy
    pub output_naming: OutputNaming,

    /// Output file name for `fixed-name`
    pub output_name: String,

    /// Suffix for `suffix-append`
    pub output_suffix: String,

    /// Debug symbol policy
    pub debug_symbols: DebugSymbols,

    /// Flag that asks the assembler for debug symbols
    pub debug_flag: String,

    /// Debug symbol file written under `always-on`
    pub symbols_file: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            output_format: "bin".to_string(),
            directive_style: "-dotdir".to_string(),
            output_naming: OutputNaming::SuffixAppend,
            output_name: "a.out".to_string(),
            output_suffix: ".out".to_string(),
            debug_symbols: DebugSymbols::FlagGated,
            debug_flag: "-debug".to_string(),
            symbols_file: "symbols.dbg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.toolchain.binary, "vasm6502_oldstyle");
        assert_eq!(config.toolchain.format, ArchiveFormat::Zip);
        assert_eq!(config.assembler.output_naming, OutputNaming::SuffixAppend);
        assert_eq!(config.assembler.debug_symbols, DebugSymbols::FlagGated);
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
            [toolchain]
            format = "tar-gz"
            archive = "vasm.tar.gz"

            [assembler]
            output_naming = "fixed-name"
            debug_symbols = "always-on"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.toolchain.format, ArchiveFormat::TarGz);
        assert_eq!(config.toolchain.archive_name(), "vasm.tar.gz");
        assert_eq!(config.toolchain.cpu, "6502");
        assert_eq!(config.assembler.output_naming, OutputNaming::FixedName);
        assert_eq!(config.assembler.debug_symbols, DebugSymbols::AlwaysOn);
        assert_eq!(config.assembler.output_name, "a.out");
    }

    #[test]
    fn archive_name_follows_format() {
        assert_eq!(ToolchainConfig::default().archive_name(), "vasm.zip");

        let config: Config = toml::from_str("[toolchain]\nformat = \"tar-gz\"\n").unwrap();
        assert_eq!(config.toolchain.archive_name(), "vasm.tar.gz");

        let config: Config =
            toml::from_str("[toolchain]\nformat = \"tar-gz\"\narchive = \"src.tgz\"\n").unwrap();
        assert_eq!(config.toolchain.archive_name(), "src.tgz");
    }

    #[test]
    fn reject_unknown_policy() {
        let result: Result<Config, _> = toml::from_str("[assembler]\noutput_naming = \"random\"\n");
        assert!(result.is_err());
    }
}
