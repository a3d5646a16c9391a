//! Terminal tool
//!
//! Signals the loop to stop. Performs no computation; it packages the model's
//! final answer and the list of tools used into the returned payload.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::{Result, ToolDefinition, ToolOutput};
use crate::tools::{string_arg, Tool};
use crate::tools::registry::FINAL_ANSWER;

/// The reserved terminal tool
#[derive(Debug, Clone, Default)]
pub struct FinalAnswerTool;

impl FinalAnswerTool {
    /// Create a new terminal tool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for FinalAnswerTool {
    fn name(&self) -> &str {
        FINAL_ANSWER
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            FINAL_ANSWER,
            "Use this tool to provide the final answer to the user. The answer \
             must be natural language, as it is shown to the user directly. \
             tools_used must list the tool names that were used in the scratchpad.",
            json!({
                "type": "object",
                "properties": {
                    "answer": {
                        "type": "string",
                        "description": "The final natural-language answer"
                    },
                    "tools_used": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Names of the tools used to produce the answer"
                    }
                },
                "required": ["answer", "tools_used"]
            }),
        )
    }

    async fn execute(&self, arguments: &Value) -> Result<ToolOutput> {
        let answer = string_arg(arguments, "answer");
        let tools_used = arguments
            .get("tools_used")
            .cloned()
            .unwrap_or_else(|| json!([]));

        Ok(ToolOutput::Structured(json!({
            "answer": answer,
            "tools_used": tools_used,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echoes_arguments_verbatim() {
        let tool = FinalAnswerTool::new();
        let payload = tool
            .execute(&json!({
                "answer": "Try an omelette",
                "tools_used": ["suggest_recipe"],
            }))
            .await
            .unwrap()
            .into_payload();

        assert_eq!(
            payload,
            json!({"answer": "Try an omelette", "tools_used": ["suggest_recipe"]})
        );
    }

    #[tokio::test]
    async fn test_missing_fields_default() {
        let tool = FinalAnswerTool::new();
        let payload = tool.execute(&json!({})).await.unwrap().into_payload();
        assert_eq!(payload, json!({"answer": "", "tools_used": []}));
    }
}
