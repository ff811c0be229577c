//! Toolchain acquisition for the vasm assembler
//!
//! The assembler binary is cached in the working directory. Presence of the
//! file is the only cache signal: it is never checksummed or version-checked.
//!
//! # Acquisition States
//!
//! | State | Next step | Description |
//! |-------|-----------|-------------|
//! | Hit | invoke | Binary present in the working directory |
//! | Miss | confirm | Binary absent, ask before touching network or disk |
//! | Declined | exit 0 | User said no, nothing was written |
//! | Staged | extract | Archive present in the staging directory (downloaded or reused) |
//! | Built | install | `make` succeeded inside the staging directory |
//! | Installed | invoke | Binary moved into the working directory |
//!
//! Neither the binary nor the staging directory is versioned; upgrading the
//! assembler means deleting both by hand.

mod acquire;
pub mod build;
pub mod fetch;
mod gate;
pub mod install;
mod layout;
mod lock;

pub use acquire::{Acquirer, Acquisition};
pub use fetch::{ArchiveFetcher, FetchOutcome, HttpFetcher};
pub use gate::{AlwaysNo, AlwaysYes, ConfirmGate, PromptGate};
pub use layout::ToolchainLayout;
pub use lock::AcquisitionLock;
