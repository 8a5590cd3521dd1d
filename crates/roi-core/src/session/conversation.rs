//! Control-bearing conversation state.
//!
//! The agent state and the agent-facing history are owned by the remote agent.
//! They are carried here as opaque values and sent back verbatim on every
//! turn; nothing in this workspace looks inside them.

use crate::agent::AgentReply;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque "current state" token handed back by the remote agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentState(Value);

impl AgentState {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// One opaque record of the agent-facing conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecord(Value);

impl HistoryRecord {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }
}

/// Opaque conversation identifier assigned by the remote agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replacement values used when a turn must ignore the current state.
///
/// An outer `None` means "use the current value"; `Some(None)` forces null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateOverrides {
    pub conversation_id: Option<Option<ConversationId>>,
    pub agent_state: Option<Option<AgentState>>,
    pub history: Option<Vec<HistoryRecord>>,
}

impl StateOverrides {
    /// Overrides that force an empty context: null id, null state, no history.
    pub fn cleared() -> Self {
        Self {
            conversation_id: Some(None),
            agent_state: Some(None),
            history: Some(Vec::new()),
        }
    }
}

/// Conversation id, agent state and agent-facing history of one chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    conversation_id: Option<ConversationId>,
    agent_state: Option<AgentState>,
    history: Vec<HistoryRecord>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    pub fn agent_state(&self) -> Option<&AgentState> {
        self.agent_state.as_ref()
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.conversation_id.is_none() && self.agent_state.is_none() && self.history.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the effective state for an outgoing turn.
    ///
    /// Each override that is present wins over the current value.
    pub fn resolve(&self, overrides: Option<&StateOverrides>) -> ConversationState {
        let Some(overrides) = overrides else {
            return self.clone();
        };

        ConversationState {
            conversation_id: overrides
                .conversation_id
                .clone()
                .unwrap_or_else(|| self.conversation_id.clone()),
            agent_state: overrides
                .agent_state
                .clone()
                .unwrap_or_else(|| self.agent_state.clone()),
            history: overrides
                .history
                .clone()
                .unwrap_or_else(|| self.history.clone()),
        }
    }

    /// Folds a successful reply into the state.
    ///
    /// History is replaced when the reply carries it. Agent state and
    /// conversation id are replaced together when the reply carries either of
    /// them, and both are left untouched when it carries neither.
    pub fn apply_reply(&mut self, reply: &AgentReply) {
        if let Some(history) = &reply.conversation_history {
            self.history = history.clone();
        }

        if reply.current_state.is_some() || reply.conversation_id.is_some() {
            self.agent_state = reply.current_state.clone().map(AgentState);
            self.conversation_id = reply.conversation_id.clone().map(ConversationId);
        }
    }
}
