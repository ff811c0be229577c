//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{VasmupError, VasmupResult};
use std::io;

/// Ask a yes/no question
///
/// Returns `true` without asking in auto-yes mode and `default` when there
/// is no terminal to ask on.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> VasmupResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        println!("  {} (no terminal, answering {})", message, if default { "yes" } else { "no" });
        return Ok(default);
    }

    // cliclack blocks on the terminal
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message).initial_value(default).interact()
    })
    .await
    .map_err(|e| VasmupError::Internal(format!("Prompt task failed: {}", e)))?;

    answer(result)
}

/// Esc and Ctrl-C at the prompt count as "no"
fn answer(result: io::Result<bool>) -> VasmupResult<bool> {
    match result {
        Ok(yes) => Ok(yes),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(false),
        Err(e) => Err(VasmupError::User(format!("Prompt failed: {}", e))),
    }
}
