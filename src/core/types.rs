//! Shared types used across souschef modules
//!
//! Contains tool call structures, tool definitions, and output normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool call proposed by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for pairing the call with its result
    pub id: String,
    /// Name of the tool to invoke
    pub name: String,
    /// JSON arguments for the tool
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Definition of a tool that can be selected by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,
    /// Description the model uses to choose among tools
    pub description: String,
    /// JSON Schema for the named arguments
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Raw output of a tool execution
///
/// Tool authors may return plain text or structured data; the loop
/// normalizes both into one canonical payload shape.
#[derive(Debug, Clone)]
pub enum ToolOutput {
    /// Plain text output
    Text(String),
    /// Already-structured output
    Structured(Value),
}

impl ToolOutput {
    /// Normalize into the canonical scratchpad payload.
    ///
    /// Text that parses as a JSON object becomes that object; anything
    /// else is wrapped as `{"answer": <raw text>}`.
    pub fn into_payload(self) -> Value {
        match self {
            ToolOutput::Structured(value) => value,
            ToolOutput::Text(text) => match serde_json::from_str::<Value>(&text) {
                Ok(value @ Value::Object(_)) => value,
                _ => serde_json::json!({ "answer": text }),
            },
        }
    }
}

/// Extract the `answer` field from a final payload.
///
/// Falls back to the stringified payload when the field is absent, so a
/// terminal tool that forgot the field still yields a usable answer.
pub fn answer_text(payload: &Value) -> String {
    match payload.get("answer").and_then(Value::as_str) {
        Some(answer) => answer.to_string(),
        None => payload.to_string(),
    }
}
