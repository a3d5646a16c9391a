//! LLM module - model gateway integrations
//!
//! Provides the tool-selection gateway abstraction with Gemini as the
//! production implementation.

pub mod gemini;
pub mod traits;

pub use gemini::GeminiClient;
pub use traits::ToolSelector;
