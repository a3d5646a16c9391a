//! Agent control loop
//!
//! Drives the select -> execute -> record cycle between the model gateway and
//! the tool registry until the terminal tool is called or the iteration cap
//! is reached.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::agent::history::History;
use crate::agent::scratchpad::Scratchpad;
use crate::core::{answer_text, Config, Result, SousChefError};
use crate::llm::{GeminiClient, ToolSelector};
use crate::tools::{ToolRegistry, FINAL_ANSWER};

/// Executes the tool-calling loop for one conversation.
///
/// An executor owns its history exclusively; concurrent `invoke` calls on
/// the same instance are not supported. Callers must serialize access or
/// use one instance per conversation.
pub struct AgentExecutor {
    /// Model gateway used for tool selection
    gateway: Box<dyn ToolSelector>,
    /// Tool registry, fixed at construction
    tools: Arc<ToolRegistry>,
    /// Completed turns, replayed to the gateway on each call
    history: History,
    /// Iteration cap for one invocation
    max_iterations: usize,
}

impl AgentExecutor {
    /// Create an executor with an explicit gateway and registry
    pub fn new(
        gateway: Box<dyn ToolSelector>,
        tools: Arc<ToolRegistry>,
        max_iterations: usize,
    ) -> Self {
        Self {
            gateway,
            tools,
            history: History::new(),
            max_iterations,
        }
    }

    /// Create an executor backed by the Gemini API and the default tools
    pub fn with_config(config: &Config) -> Result<Self> {
        let client = GeminiClient::from_config(config)?;
        let tools = Arc::new(ToolRegistry::with_default_tools(client.clone()));
        Ok(Self::new(
            Box::new(client),
            tools,
            config.agent.max_iterations,
        ))
    }

    /// Run the loop for one user utterance.
    ///
    /// Returns the terminal tool's payload on success. Fails with
    /// `AgentExhausted` when no `final_answer` call occurs within the
    /// iteration cap, `UnknownTool` when the gateway proposes a name that is
    /// not registered, and `ToolExecution` when the selected tool fails.
    /// Tool output that is not structured data is recovered by wrapping it
    /// as `{"answer": <text>}`; every other failure propagates.
    pub async fn invoke(&mut self, input: &str) -> Result<Value> {
        info!(input, "invoking agent");

        let mut scratchpad = Scratchpad::new();
        let definitions = self.tools.definitions();

        for iteration in 0..self.max_iterations {
            debug!(iteration = iteration + 1, "agent iteration");

            let call = self
                .gateway
                .select_tool(input, &self.history, &scratchpad, &definitions)
                .await?;

            info!(tool = %call.name, args = %call.arguments, "executing tool");
            scratchpad.push_call(call.clone());

            let tool = self.tools.resolve(&call.name)?;
            let output = tool
                .execute(&call.arguments)
                .await
                .map_err(|e| SousChefError::tool(format!("{}: {}", call.name, e)))?;

            let payload = output.into_payload();
            debug!(tool = %call.name, payload = %payload, "tool output");
            scratchpad.push_result(call.id.clone(), payload.clone());

            if call.name == FINAL_ANSWER {
                let answer = answer_text(&payload);
                info!(iterations = iteration + 1, "final answer produced");
                self.history.push(input, answer);
                return Ok(payload);
            }
        }

        info!(iterations = self.max_iterations, "iteration cap reached");
        Err(SousChefError::AgentExhausted {
            iterations: self.max_iterations,
            last_payload: scratchpad.last_payload().cloned(),
        })
    }

    /// Read access to the conversation history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Clear conversation history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The registered tool definitions, in registration order
    pub fn tool_definitions(&self) -> Vec<crate::core::ToolDefinition> {
        self.tools.definitions()
    }
}
