//! Model gateway trait
//!
//! Abstracts the capability that proposes the next tool call, so the loop can
//! be driven by the Gemini client in production and scripted gateways in
//! tests.

use async_trait::async_trait;

use crate::agent::{History, Scratchpad};
use crate::core::{Result, ToolCall, ToolDefinition};

/// A gateway that selects exactly one tool call per request.
///
/// The gateway receives the current utterance, the ordered conversation
/// history, the in-progress scratchpad, and the registered tool definitions.
/// It must return one well-formed call; a reply without a tool call is an
/// `UpstreamContract` error, never a valid no-op. Retry and timeout policy
/// lives behind this trait, not in the loop.
#[async_trait]
pub trait ToolSelector: Send + Sync {
    /// Propose the next tool invocation
    async fn select_tool(
        &self,
        input: &str,
        history: &History,
        scratchpad: &Scratchpad,
        tools: &[ToolDefinition],
    ) -> Result<ToolCall>;
}
