//! Turn orchestration.
//!
//! The orchestrator owns the control-bearing state of one conversation and is
//! the only writer of it. Each turn resolves the effective state, sends it to
//! the agent, and folds the reply back in once the call completes.
//!
//! A reset bumps a generation counter. A reply whose turn started under an
//! older generation is dropped without touching the state.

use roi_core::agent::{AgentGateway, AgentReply, AgentRequest, ReplyStatus};
use roi_core::calculation::CollectedData;
use roi_core::completion;
use roi_core::error::Result;
use roi_core::session::{ConversationState, CorrectionState, SessionContext, StateOverrides};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A reply that was folded into the conversation state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedTurn {
    pub reply: AgentReply,
    pub status: ReplyStatus,
    /// Data extracted from this reply, if it completed the collection.
    pub collected: Option<CollectedData>,
    /// Generation the reply was applied under.
    pub generation: u64,
}

/// Result of [`TurnOrchestrator::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Applied(AppliedTurn),
    /// The conversation was reset while the call was outstanding.
    Discarded,
}

/// Copy of the orchestrator's state at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSnapshot {
    pub conversation: ConversationState,
    pub correction: Option<CorrectionState>,
    pub collected: Option<CollectedData>,
    pub generation: u64,
}

impl ChatSnapshot {
    pub fn awaiting_corrections(&self) -> bool {
        self.correction
            .as_ref()
            .is_some_and(CorrectionState::awaiting_corrections)
    }

    pub fn ready_to_calculate(&self) -> bool {
        self.collected.is_some()
    }
}

/// Sequences agent turns for one conversation.
pub struct TurnOrchestrator {
    gateway: Arc<dyn AgentGateway>,
    context: SessionContext,
    /// Never held across the agent call.
    state: Mutex<ChatSnapshot>,
}

impl TurnOrchestrator {
    pub fn new(gateway: Arc<dyn AgentGateway>, context: SessionContext) -> Self {
        Self {
            gateway,
            context,
            state: Mutex::new(ChatSnapshot::default()),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Sends one turn and folds the reply into the conversation state.
    ///
    /// # Arguments
    ///
    /// * `text` - Outgoing message
    /// * `overrides` - Replacement conversation id, agent state or history for
    ///   this turn; used to force a clean context right after a reset
    ///
    /// # Returns
    ///
    /// - `Ok(SubmitOutcome::Applied)`: The reply was applied
    /// - `Ok(SubmitOutcome::Discarded)`: A reset happened while the call was outstanding
    ///
    /// # Errors
    ///
    /// Returns `AgentCallFailed` when the agent call fails. The state is left
    /// exactly as it was before the call; nothing is retried.
    pub async fn submit(
        &self,
        text: &str,
        overrides: Option<&StateOverrides>,
    ) -> Result<SubmitOutcome> {
        let (request, effective, generation) = {
            let state = self.state.lock().await;
            let effective = state.conversation.resolve(overrides);
            let correction_context = state
                .correction
                .as_ref()
                .filter(|c| c.awaiting_corrections())
                .map(CorrectionState::context);
            let request = AgentRequest::new(
                text,
                self.context.system_id.as_str(),
                self.context.agent_mode,
                effective.clone(),
                correction_context,
            );
            (request, effective, state.generation)
        };

        tracing::debug!(
            "[TurnOrchestrator] Sending turn (generation={}, history={}, correction={})",
            generation,
            request.conversation_history.len(),
            request.correction_context.is_some()
        );

        let result = self.gateway.send_turn(&request).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::warn!(
                "[TurnOrchestrator] Dropping reply from generation {} (current {})",
                generation,
                state.generation
            );
            return Ok(SubmitOutcome::Discarded);
        }

        let reply = result.inspect_err(|e| {
            tracing::warn!("[TurnOrchestrator] Agent call failed: {}", e);
        })?;

        if overrides.is_some() {
            state.conversation = effective;
        }
        state.conversation.apply_reply(&reply);

        let reduction = completion::reduce(&reply, self.context.agent_mode);
        let status = reduction.status;
        let collected = reduction.collected.clone();
        let ChatSnapshot {
            correction,
            collected: held,
            ..
        } = &mut *state;
        reduction.apply_to(correction, held);

        tracing::debug!(
            "[TurnOrchestrator] Applied reply: status={:?}, awaiting_corrections={}, ready={}",
            status,
            state.awaiting_corrections(),
            state.ready_to_calculate()
        );

        Ok(SubmitOutcome::Applied(AppliedTurn {
            reply,
            status,
            collected,
            generation,
        }))
    }

    /// Empties the conversation, correction and collected data, and
    /// invalidates every outstanding turn.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        let generation = state.generation + 1;
        *state = ChatSnapshot {
            generation,
            ..ChatSnapshot::default()
        };
        tracing::debug!("[TurnOrchestrator] Reset to generation {}", generation);
    }

    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }

    pub async fn snapshot(&self) -> ChatSnapshot {
        self.state.lock().await.clone()
    }

    pub async fn collected_data(&self) -> Option<CollectedData> {
        self.state.lock().await.collected.clone()
    }
}
