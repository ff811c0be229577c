//! Error types for vasmup
//!
//! All modules use `VasmupResult<T>` as their return type. Every delegated
//! step (fetch, extract, build, install, assemble) has its own variant so a
//! failure is reported where it happened.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vasmup operations
pub type VasmupResult<T> = Result<T, VasmupError>;

/// All errors that can occur in vasmup
#[derive(Error, Debug)]
pub enum VasmupError {
    // Acquisition errors
    #[error("Failed to download {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Archive extraction failed: {command} ({status})\n{output}")]
    Extract {
        command: String,
        status: String,
        output: String,
    },

    #[error("Toolchain build failed: {command} ({status})\n{output}")]
    Build {
        command: String,
        status: String,
        output: String,
    },

    #[error("Build finished but produced no binary at {}", path.display())]
    BinaryMissing { path: PathBuf },

    #[error("Failed to install {} to {}: {source}", from.display(), to.display())]
    Install {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Invocation errors
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Assembling {} failed ({status})\n{output}", input.display())]
    Assemble {
        input: PathBuf,
        status: String,
        output: String,
    },

    // Configuration errors
    #[error("Invalid configuration at {}: {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl VasmupError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Fetch { .. } => Some("Check your network connection and toolchain.url"),
            Self::Extract { .. } => Some("Delete the archive in the staging directory and retry"),
            Self::Build { .. } => {
                Some("Check that a C compiler is installed, then delete the staging directory")
            }
            Self::BinaryMissing { .. } => {
                Some("Check that toolchain.binary matches the configured cpu and syntax")
            }
            Self::CommandFailed { .. } => Some("Install make, unzip or tar and make sure it is on PATH"),
            Self::Lock { .. } => Some("Another vasmup may be building in this directory"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = VasmupError::InputNotFound(PathBuf::from("prog.asm"));
        assert_eq!(err.to_string(), "Input file not found: prog.asm");
    }

    #[test]
    fn build_and_missing_binary_are_distinct() {
        let build = VasmupError::Build {
            command: "make -C vasm-main".to_string(),
            status: "exit code 2".to_string(),
            output: "error: cc not found".to_string(),
        };
        let missing = VasmupError::BinaryMissing {
            path: PathBuf::from("vasm-main/vasm6502_oldstyle"),
        };

        assert!(build.to_string().starts_with("Toolchain build failed"));
        assert!(build.to_string().contains("exit code 2"));
        assert!(missing.to_string().starts_with("Build finished but produced no binary"));
    }

    #[test]
    fn error_hint() {
        let err = VasmupError::fetch("https://example.invalid", "dns error");
        assert!(err.hint().unwrap().contains("network"));
        assert_eq!(VasmupError::User("nope".to_string()).hint(), None);
    }
}
