//! Per-invocation scratchpad
//!
//! Records the proposed tool calls and their results for one `invoke` call.
//! The sequence strictly alternates ProposedCall -> ToolResult, starting with
//! ProposedCall, so the gateway can replay exact call/response pairing to the
//! model. A scratchpad never outlives its invocation.

use serde_json::Value;

use crate::core::ToolCall;

/// One entry in the scratchpad
#[derive(Debug, Clone)]
pub enum ScratchpadEntry {
    /// A tool invocation proposed by the model
    ProposedCall(ToolCall),
    /// The normalized result of executing the matching call
    ToolResult { call_id: String, payload: Value },
}

/// Ordered record of in-progress tool exchanges
#[derive(Debug, Clone, Default)]
pub struct Scratchpad {
    entries: Vec<ScratchpadEntry>,
}

impl Scratchpad {
    /// Create an empty scratchpad
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a proposed tool call
    pub fn push_call(&mut self, call: ToolCall) {
        debug_assert!(
            !matches!(self.entries.last(), Some(ScratchpadEntry::ProposedCall(_))),
            "scratchpad must alternate: result missing for previous call"
        );
        self.entries.push(ScratchpadEntry::ProposedCall(call));
    }

    /// Append the result for the most recent proposed call
    pub fn push_result(&mut self, call_id: impl Into<String>, payload: Value) {
        let call_id = call_id.into();
        debug_assert!(
            matches!(
                self.entries.last(),
                Some(ScratchpadEntry::ProposedCall(call)) if call.id == call_id
            ),
            "scratchpad must alternate: result does not match the last call"
        );
        self.entries.push(ScratchpadEntry::ToolResult { call_id, payload });
    }

    /// All entries in production order
    pub fn entries(&self) -> &[ScratchpadEntry] {
        &self.entries
    }

    /// Look up the tool name of a proposed call by its id
    pub fn call_name(&self, call_id: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            ScratchpadEntry::ProposedCall(call) if call.id == call_id => Some(call.name.as_str()),
            _ => None,
        })
    }

    /// The payload of the most recent tool result, if any
    pub fn last_payload(&self) -> Option<&Value> {
        self.entries.iter().rev().find_map(|entry| match entry {
            ScratchpadEntry::ToolResult { payload, .. } => Some(payload),
            _ => None,
        })
    }

    /// Get entry count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
