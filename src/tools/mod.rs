//! Tools module - invocable capabilities the model can select
//!
//! Contains the tool trait, the registry, and the recipe/nutrition/terminal
//! tools.

pub mod final_answer;
pub mod nutrition;
pub mod recipe;
pub mod registry;

pub use final_answer::FinalAnswerTool;
pub use nutrition::NutritionTool;
pub use recipe::{CookingInstructionTool, SuggestRecipeTool};
pub use registry::{ToolRegistry, FINAL_ANSWER};

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{Result, ToolDefinition, ToolOutput};

/// An invocable capability with a declared argument schema.
///
/// Tools take named arguments only and must be safe to call more than once
/// with the same arguments. They may return plain text or structured data;
/// the loop normalizes both.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name
    fn name(&self) -> &str;

    /// Definition handed to the model for tool selection
    fn definition(&self) -> ToolDefinition;

    /// Execute with the model-supplied arguments
    async fn execute(&self, arguments: &Value) -> Result<ToolOutput>;
}

/// Read a string argument by key, empty when absent
pub(crate) fn string_arg(arguments: &Value, key: &str) -> String {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
