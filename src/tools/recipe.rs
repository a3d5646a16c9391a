//! Recipe tools
//!
//! Suggest a recipe from user preferences and produce cooking instructions,
//! both backed by the Gemini text API.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::{Result, ToolDefinition, ToolOutput};
use crate::llm::GeminiClient;
use crate::tools::{string_arg, Tool};

const SUGGEST_PROMPT: &str = "You are a recipe expert. Generate a real recipe \
    name that matches the user's preferences and available ingredients. Reply \
    with the recipe name only.";

const INSTRUCTION_PROMPT: &str = "You are a cooking expert. Given a recipe \
    name, provide detailed step-by-step instructions on how to cook the dish.";

/// Tool that suggests a recipe from user preferences
pub struct SuggestRecipeTool {
    client: GeminiClient,
}

impl SuggestRecipeTool {
    /// Create a new suggestion tool
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SuggestRecipeTool {
    fn name(&self) -> &str {
        "suggest_recipe"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "suggest_recipe",
            "Suggest a recipe based on user preferences (e.g., 'high-protein, low-sugar breakfast').",
            json!({
                "type": "object",
                "properties": {
                    "user_input": {
                        "type": "string",
                        "description": "The user's preferences and available ingredients"
                    }
                },
                "required": ["user_input"]
            }),
        )
    }

    async fn execute(&self, arguments: &Value) -> Result<ToolOutput> {
        let user_input = string_arg(arguments, "user_input");
        let recipe = self.client.generate(SUGGEST_PROMPT, &user_input).await?;
        Ok(ToolOutput::Text(recipe))
    }
}

/// Tool that produces cooking instructions for a named dish
pub struct CookingInstructionTool {
    client: GeminiClient,
}

impl CookingInstructionTool {
    /// Create a new instruction tool
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CookingInstructionTool {
    fn name(&self) -> &str {
        "cooking_instruction"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "cooking_instruction",
            "Return instructions on how to cook a given dish.",
            json!({
                "type": "object",
                "properties": {
                    "recipe_name": {
                        "type": "string",
                        "description": "Name of the dish to cook"
                    }
                },
                "required": ["recipe_name"]
            }),
        )
    }

    async fn execute(&self, arguments: &Value) -> Result<ToolOutput> {
        let recipe_name = string_arg(arguments, "recipe_name");
        let instructions = self
            .client
            .generate(INSTRUCTION_PROMPT, &recipe_name)
            .await?;
        Ok(ToolOutput::Text(instructions))
    }
}
