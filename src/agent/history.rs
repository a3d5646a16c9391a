//! Conversation history management
//!
//! Append-only record of completed user/answer turns, replayed to the model
//! on every subsequent call within the same agent instance. Kept in process
//! memory only.

use serde::{Deserialize, Serialize};

/// One completed exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The user's utterance
    pub input: String,
    /// The final answer produced by the loop
    pub answer: String,
}

/// Ordered conversation history, oldest turn first
#[derive(Debug, Clone, Default)]
pub struct History {
    turns: Vec<ConversationTurn>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed turn
    pub fn push(&mut self, input: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ConversationTurn {
            input: input.into(),
            answer: answer.into(),
        });
    }

    /// All turns in completion order
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The most recent turn
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Get turn count
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
