//! Command-line interface

pub mod args;
mod assemble;

pub use args::Cli;
pub use assemble::execute;
