//! Terminal output for vasmup
//!
//! Uses `cliclack` for prompts and step markers with automatic fallback to
//! plain output in CI/non-interactive environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use vasmup::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect().with_auto_yes(args.yes);
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Extracting vasm.zip...");
//! // ... do work ...
//! spinner.stop("Extracted vasm.zip");
//!
//! let yes = ui::confirm(&ctx, "Download and build vasm?", false).await?;
//! ```

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{remark, step_info, step_ok, step_warn};
pub use progress::{BuildProgress, TaskSpinner};
pub use prompts::confirm;
