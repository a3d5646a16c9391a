//! Agent module - the tool-calling control loop and its state
//!
//! Contains the executor that coordinates gateway calls and tool execution.

pub mod executor;
pub mod history;
pub mod scratchpad;

pub use executor::AgentExecutor;
pub use history::{ConversationTurn, History};
pub use scratchpad::{Scratchpad, ScratchpadEntry};
