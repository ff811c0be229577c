//! vasmup - fetch, build and run the vasm 6502 assembler
//!
//! Ensures `vasm6502_oldstyle` is present in the working directory,
//! building it from source on first use, then assembles a source file
//! with a fixed flag set.

pub mod cli;
pub mod config;
pub mod error;
pub mod invoke;
pub mod process;
pub mod toolchain;
pub mod ui;

pub use error::{VasmupError, VasmupResult};
