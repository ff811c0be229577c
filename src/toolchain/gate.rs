//! Authorization gate in front of network and build side effects

use crate::error::VasmupResult;
use crate::ui::{self, UiContext};
use async_trait::async_trait;

/// Single-shot yes/no decision before acquisition starts
#[async_trait]
pub trait ConfirmGate: Send + Sync {
    async fn confirm(&self, message: &str) -> VasmupResult<bool>;
}

/// Asks on the terminal; declines when there is no terminal
pub struct PromptGate {
    ctx: UiContext,
}

impl PromptGate {
    pub fn new(ctx: &UiContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl ConfirmGate for PromptGate {
    async fn confirm(&self, message: &str) -> VasmupResult<bool> {
        ui::confirm(&self.ctx, message, false).await
    }
}

/// Approves without asking
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysYes;

#[async_trait]
impl ConfirmGate for AlwaysYes {
    async fn confirm(&self, _message: &str) -> VasmupResult<bool> {
        Ok(true)
    }
}

/// Declines without asking
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysNo;

#[async_trait]
impl ConfirmGate for AlwaysNo {
    async fn confirm(&self, _message: &str) -> VasmupResult<bool> {
        Ok(false)
    }
}
