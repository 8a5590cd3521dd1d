//! Agent turn endpoint contract.
//!
//! Wire types for the conversational agent and the [`AgentGateway`] trait
//! implemented by `roi-interaction`.

mod status;

pub use status::{CompletionSignal, ReplyStatus};

use crate::error::Result;
use crate::session::{
    AgentMode, AgentState, ConversationId, ConversationState, CorrectionContext, FieldDescriptor,
    HistoryRecord,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Synthetic message that opens every conversation. Never shown in the transcript.
pub const GREETING_TOKEN: &str = "Hello";

/// Request body for one agent turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRequest {
    pub message: String,
    pub system: String,
    pub conversation_history: Vec<HistoryRecord>,
    pub user_type: AgentMode,
    pub current_state: Option<AgentState>,
    pub conversation_id: Option<ConversationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_context: Option<CorrectionContext>,
}

impl AgentRequest {
    /// Builds a request from the effective conversation state.
    pub fn new(
        message: impl Into<String>,
        system: impl Into<String>,
        mode: AgentMode,
        state: ConversationState,
        correction_context: Option<CorrectionContext>,
    ) -> Self {
        Self {
            message: message.into(),
            system: system.into(),
            conversation_history: state.history().to_vec(),
            user_type: mode,
            current_state: state.agent_state().cloned(),
            conversation_id: state.conversation_id().cloned(),
            correction_context,
        }
    }
}

/// Reply body of one agent turn.
///
/// `current_state` is kept as a raw value: the completion detector reads the
/// guided-mode collected data from it before it becomes an opaque
/// [`AgentState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub conversation_history: Option<Vec<HistoryRecord>>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub current_state: Option<Value>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub missing_or_invalid_fields: Option<Vec<FieldDescriptor>>,
    #[serde(default)]
    pub ready_for_calculation: Option<bool>,
    #[serde(default)]
    pub validation_report: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl AgentReply {
    pub fn classify(&self) -> ReplyStatus {
        ReplyStatus::classify(self.status.as_deref())
    }

    /// Assistant text, if the agent sent any.
    pub fn text(&self) -> Option<&str> {
        Some(self.response.as_str()).filter(|r| !r.trim().is_empty())
    }
}

/// Remote conversational agent.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// Sends one turn and returns the parsed reply.
    ///
    /// # Errors
    ///
    /// Returns `AgentCallFailed` on transport, HTTP status or parse failures.
    async fn send_turn(&self, request: &AgentRequest) -> Result<AgentReply>;
}
