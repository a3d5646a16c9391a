//! Custom error types for souschef
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for souschef operations
#[derive(Error, Debug)]
pub enum SousChefError {
    /// Gemini connection or API errors
    #[error("Gemini error: {0}")]
    Gemini(String),

    /// The model gateway did not return a well-formed single tool proposal
    #[error("model gateway contract violation: {0}")]
    UpstreamContract(String),

    /// A proposed tool name is not present in the registry
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The invoked tool itself failed
    #[error("tool execution error: {0}")]
    ToolExecution(String),

    /// The iteration cap was reached without a `final_answer` call.
    /// The last tool payload rides along for diagnostics only; it is
    /// never surfaced as a degraded answer.
    #[error("agent exhausted after {iterations} iterations without a final answer")]
    AgentExhausted {
        iterations: usize,
        last_payload: Option<serde_json::Value>,
    },

    /// The fridge photo captioning reply was not a parseable item list
    #[error("fridge analysis error: {0}")]
    MalformedAnalysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for souschef operations
pub type Result<T> = std::result::Result<T, SousChefError>;

impl SousChefError {
    /// Create a Gemini error
    pub fn gemini(msg: impl Into<String>) -> Self {
        Self::Gemini(msg.into())
    }

    /// Create an upstream contract error
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::UpstreamContract(msg.into())
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::ToolExecution(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
