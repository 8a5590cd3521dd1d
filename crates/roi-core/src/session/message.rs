//! Display transcript types.
//!
//! The transcript is what the user sees. It never drives control decisions;
//! the agent-facing history lives in [`super::ConversationState`].

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the remote agent (or a local fallback in its place).
    Assistant,
}

/// A single displayed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: MessageRole,
    pub content: String,
    /// Timestamp when the turn was appended (ISO 8601 format).
    pub timestamp: String,
}

impl Turn {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Ordered, append-only log of displayed turns.
///
/// Turns are immutable once appended; the only way to remove them is
/// [`Transcript::clear`], used by the chat reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Turn {
        self.push(Turn::new(MessageRole::User, content))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Turn {
        self.push(Turn::new(MessageRole::Assistant, content))
    }

    fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
