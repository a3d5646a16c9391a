//! souschef - Conversational Recipe Assistant
//!
//! A Gemini-backed assistant that answers cooking questions by running a
//! bounded tool-calling loop: the model repeatedly picks one of a small set
//! of tools (recipe suggestion, nutrition lookup, cooking instructions,
//! final-answer) until it signals completion.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Tool-selection gateway abstraction with the Gemini client
//! - **Tools**: Tool registry and the recipe/nutrition/terminal tools
//! - **Agent**: The control loop, scratchpad, and conversation history
//! - **Fridge**: Photo-to-item-list analysis
//! - **Server**: HTTP endpoints for the web client
//! - **CLI**: Command-line interface and REPL
//!
//! # Usage
//!
//! ```rust,no_run
//! use souschef::{AgentExecutor, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load();
//!     let mut agent = AgentExecutor::with_config(&config).unwrap();
//!
//!     let payload = agent.invoke("high protein breakfast").await.unwrap();
//!     println!("{}", payload);
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod core;
pub mod fridge;
pub mod llm;
pub mod server;
pub mod tools;

// Re-export commonly used items
pub use agent::AgentExecutor;
pub use cli::Repl;
pub use core::{Config, Result, SousChefError};
