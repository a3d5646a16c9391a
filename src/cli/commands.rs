//! REPL command handling

use crate::agent::AgentExecutor;

/// Outcome of parsing one line of REPL input
pub enum CommandResult {
    /// Exit the REPL
    Exit,
    /// A command produced output; print it and prompt again
    Handled(String),
    /// Not a command; process as a chat message
    Continue(String),
}

/// Interpret a line of input, running any built-in command
pub fn handle_command(input: &str, agent: &mut AgentExecutor) -> CommandResult {
    match input {
        "exit" | "quit" => CommandResult::Exit,
        "help" => CommandResult::Handled(help_text()),
        "clear" => {
            agent.clear_history();
            CommandResult::Handled("Conversation cleared.".to_string())
        }
        "history" => CommandResult::Handled(format_history(agent)),
        "tools" => CommandResult::Handled(format_tools(agent)),
        _ => CommandResult::Continue(input.to_string()),
    }
}

fn help_text() -> String {
    "Commands:\n\
     \x20 help     Show this help\n\
     \x20 clear    Clear conversation history\n\
     \x20 history  Show completed turns\n\
     \x20 tools    List registered tools\n\
     \x20 exit     Quit"
        .to_string()
}

fn format_history(agent: &AgentExecutor) -> String {
    if agent.history().is_empty() {
        return "No conversation yet.".to_string();
    }

    let mut output = String::new();
    for (i, turn) in agent.history().turns().iter().enumerate() {
        output.push_str(&format!(
            "[{}] You: {}\n    Assistant: {}\n",
            i + 1,
            turn.input,
            turn.answer
        ));
    }
    output
}

fn format_tools(agent: &AgentExecutor) -> String {
    agent
        .tool_definitions()
        .iter()
        .map(|def| format!("{} - {}", def.name, def.description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{History, Scratchpad};
    use crate::core::{Result, SousChefError, ToolCall, ToolDefinition};
    use crate::llm::ToolSelector;
    use crate::tools::ToolRegistry;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoopGateway;

    #[async_trait]
    impl ToolSelector for NoopGateway {
        async fn select_tool(
            &self,
            _input: &str,
            _history: &History,
            _scratchpad: &Scratchpad,
            _tools: &[ToolDefinition],
        ) -> Result<ToolCall> {
            Err(SousChefError::Other("not used".to_string()))
        }
    }

    fn test_agent() -> AgentExecutor {
        AgentExecutor::new(Box::new(NoopGateway), Arc::new(ToolRegistry::new()), 4)
    }

    #[test]
    fn test_exit_commands() {
        let mut agent = test_agent();
        assert!(matches!(handle_command("exit", &mut agent), CommandResult::Exit));
        assert!(matches!(handle_command("quit", &mut agent), CommandResult::Exit));
    }

    #[test]
    fn test_plain_input_continues() {
        let mut agent = test_agent();
        match handle_command("what can I cook tonight?", &mut agent) {
            CommandResult::Continue(input) => assert_eq!(input, "what can I cook tonight?"),
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn test_empty_history_message() {
        let mut agent = test_agent();
        match handle_command("history", &mut agent) {
            CommandResult::Handled(output) => assert!(output.contains("No conversation")),
            _ => panic!("expected Handled"),
        }
    }
}
