//! Tool registry - resolves tool names to invocables
//!
//! Built once at startup and immutable afterwards; the loop only reads it.
//! Definitions are reported in registration order so the model always sees a
//! stable tool set.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{Result, SousChefError, ToolDefinition};
use crate::llm::GeminiClient;
use crate::tools::{
    CookingInstructionTool, FinalAnswerTool, NutritionTool, SuggestRecipeTool, Tool,
};

/// Reserved terminal tool name; its invocation ends the loop
pub const FINAL_ANSWER: &str = "final_answer";

/// Registry of available tools
#[derive(Default)]
pub struct ToolRegistry {
    /// Invocables indexed by name
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Registration order of tool names
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the standard recipe assistant tools
    pub fn with_default_tools(client: GeminiClient) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SuggestRecipeTool::new(client.clone())));
        registry.register(Arc::new(NutritionTool::new(client.clone())));
        registry.register(Arc::new(CookingInstructionTool::new(client)));
        registry.register(Arc::new(FinalAnswerTool::new()));
        registry
    }

    /// Register a tool. Startup only; the set of names is fixed for the
    /// process lifetime and a name may be registered at most once.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        debug_assert!(
            !self.tools.contains_key(&name),
            "tool registered twice: {name}"
        );
        self.order.push(name.clone());
        self.tools.insert(name, tool);
    }

    /// Resolve a tool by name
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| SousChefError::UnknownTool(name.to_string()))
    }

    /// All tool definitions, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Check whether a tool name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool count
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
