//! Interactive REPL for souschef
//!
//! Provides the main terminal interaction loop.

use std::io::{self, BufRead, Write};

use crate::agent::AgentExecutor;
use crate::cli::commands::{handle_command, CommandResult};
use crate::core::{answer_text, Config, Result};

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    agent: AgentExecutor,
}

impl Repl {
    /// Create a REPL with the given configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        Ok(Self {
            agent: AgentExecutor::with_config(config)?,
        })
    }

    /// Run the REPL
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("You: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            match handle_command(input, &mut self.agent) {
                CommandResult::Exit => {
                    println!("\nGoodbye!");
                    break;
                }
                CommandResult::Handled(output) => {
                    println!("{}\n", output);
                    continue;
                }
                CommandResult::Continue(input) => match self.agent.invoke(&input).await {
                    Ok(payload) => {
                        println!("\nAssistant:\n{}\n", answer_text(&payload));
                    }
                    Err(e) => {
                        eprintln!("\nError: {}\n", e);
                    }
                },
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        println!("souschef - conversational recipe assistant");
        println!("Commands: help, clear, history, tools, exit");
        println!("──────────────────────────────────────────");
    }
}
