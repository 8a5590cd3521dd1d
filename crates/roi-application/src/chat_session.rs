//! Chat session use case.
//!
//! Wraps a [`TurnOrchestrator`] with the parts of a conversation screen that
//! are not control state: the display transcript, the auto-started greeting,
//! "clear chat", persistence of the collected data and the calculation hand-off.

use crate::calculation::{CalculationOutcome, CalculationTrigger};
use crate::orchestrator::{SubmitOutcome, TurnOrchestrator};
use crate::selection::SelectionUseCase;
use roi_core::agent::{AgentGateway, GREETING_TOKEN, ReplyStatus};
use roi_core::catalog::{self, Template};
use roi_core::error::Result;
use roi_core::session::{AgentMode, ConversationId, SessionContext, StateOverrides, Transcript};
use roi_core::store::{self, SessionStore, StoreKey};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const GREETING_FALLBACK: &str = "Welcome to the ROI analysis.";
pub const REPLY_FALLBACK: &str =
    "Thank you for your message. I will help you with the ROI analysis.";
pub const ERROR_FALLBACK: &str =
    "Sorry, there was an error processing your message. Please try again.";

const CORRECTION_HINT: &str = "Send only the corrected value...";
const DEFAULT_HINT: &str = "write the general description of the process";

/// What happened to one outgoing message.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    /// The assistant replied and the reply was appended to the transcript.
    Replied {
        text: String,
        status: ReplyStatus,
        /// Whether collected data is available for calculation.
        ready: bool,
    },
    /// The chat was cleared before the reply arrived.
    Discarded,
}

/// Facts shown on the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatStatus {
    pub history_len: usize,
    pub pending_corrections: usize,
    pub ready_to_calculate: bool,
    pub conversation_id: Option<ConversationId>,
}

/// One conversation screen.
pub struct ChatSession {
    orchestrator: TurnOrchestrator,
    transcript: Mutex<Transcript>,
    store: Arc<dyn SessionStore>,
    calculator: CalculationTrigger,
}

impl ChatSession {
    pub fn new(
        context: SessionContext,
        agent: Arc<dyn AgentGateway>,
        calculator: CalculationTrigger,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            orchestrator: TurnOrchestrator::new(agent, context),
            transcript: Mutex::new(Transcript::new()),
            store,
            calculator,
        }
    }

    /// Opens a session for the context held in the store.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionMissing` when the selection is incomplete. The
    /// caller should go back to [`Route::BusinessCase`](roi_core::route::Route::BusinessCase);
    /// no greeting has been sent.
    pub async fn open(
        store: Arc<dyn SessionStore>,
        agent: Arc<dyn AgentGateway>,
        calculator: CalculationTrigger,
    ) -> Result<Self> {
        let context = SelectionUseCase::new(store.clone()).load_context().await?;
        Ok(Self::new(context, agent, calculator, store))
    }

    pub fn context(&self) -> &SessionContext {
        self.orchestrator.context()
    }

    pub fn agent_name(&self) -> &'static str {
        self.context().agent_mode.agent_display_name()
    }

    /// Template offered to expert users.
    pub fn template(&self) -> Option<Template> {
        match self.context().agent_mode {
            AgentMode::Expert => Some(catalog::template_for(&self.context().system_id)),
            AgentMode::Guided => None,
        }
    }

    /// Sends the greeting with a forced empty context.
    ///
    /// Only the assistant's reply reaches the transcript.
    ///
    /// # Errors
    ///
    /// Returns `AgentCallFailed` when the greeting fails; nothing is appended.
    pub async fn start(&self) -> Result<SendOutcome> {
        tracing::info!(
            "[ChatSession] Starting conversation for {}",
            self.context().system_id
        );
        let overrides = StateOverrides::cleared();
        let outcome = self
            .orchestrator
            .submit(GREETING_TOKEN, Some(&overrides))
            .await?;
        self.record(outcome, GREETING_FALLBACK).await
    }

    /// Sends a user message.
    ///
    /// # Errors
    ///
    /// Returns `AgentCallFailed` when the turn fails. The user's message and
    /// an apology stay in the transcript and the message may be sent again.
    pub async fn send(&self, text: &str) -> Result<SendOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        let generation = {
            let mut transcript = self.transcript.lock().await;
            transcript.push_user(text);
            self.orchestrator.generation().await
        };

        match self.orchestrator.submit(text, None).await {
            Ok(outcome) => self.record(outcome, REPLY_FALLBACK).await,
            Err(err) => {
                let mut transcript = self.transcript.lock().await;
                if self.orchestrator.generation().await == generation {
                    transcript.push_assistant(ERROR_FALLBACK);
                }
                Err(err)
            }
        }
    }

    /// Clears the chat and greets the agent again with a clean context.
    ///
    /// Results from an earlier calculation are kept.
    ///
    /// # Errors
    ///
    /// Returns `Store` when the persisted collected data cannot be removed;
    /// the chat is left untouched in that case.
    pub async fn clear(&self) -> Result<SendOutcome> {
        {
            // Held across the reset so no reply is recorded halfway through it.
            let mut transcript = self.transcript.lock().await;
            self.store.remove(StoreKey::CollectedData).await?;
            transcript.clear();
            self.orchestrator.reset().await;
        }
        tracing::info!("[ChatSession] Chat cleared");
        self.start().await
    }

    /// Runs the calculation with the data collected so far.
    pub async fn calculate(&self) -> Result<CalculationOutcome> {
        let collected = self.orchestrator.collected_data().await;
        self.calculator
            .calculate(collected.as_ref(), &self.context().system_id)
            .await
    }

    pub async fn transcript(&self) -> Transcript {
        self.transcript.lock().await.clone()
    }

    pub async fn status(&self) -> ChatStatus {
        let snapshot = self.orchestrator.snapshot().await;
        ChatStatus {
            history_len: snapshot.conversation.history().len(),
            pending_corrections: snapshot
                .correction
                .as_ref()
                .map_or(0, |c| c.pending_count()),
            ready_to_calculate: snapshot.ready_to_calculate(),
            conversation_id: snapshot.conversation.conversation_id().cloned(),
        }
    }

    pub async fn input_hint(&self) -> &'static str {
        if self.orchestrator.snapshot().await.awaiting_corrections() {
            CORRECTION_HINT
        } else {
            DEFAULT_HINT
        }
    }

    async fn record(&self, outcome: SubmitOutcome, fallback: &str) -> Result<SendOutcome> {
        let SubmitOutcome::Applied(turn) = outcome else {
            return Ok(SendOutcome::Discarded);
        };

        // A reset may have landed between the agent reply and this point.
        let mut transcript = self.transcript.lock().await;
        if self.orchestrator.generation().await != turn.generation {
            tracing::warn!(
                "[ChatSession] Chat cleared before reply from generation {} was recorded",
                turn.generation
            );
            return Ok(SendOutcome::Discarded);
        }

        if let Some(collected) = &turn.collected {
            store::save(self.store.as_ref(), StoreKey::CollectedData, collected).await?;
            tracing::info!("[ChatSession] Collected data saved, ready to calculate");
        }

        let text = turn.reply.text().unwrap_or(fallback).to_string();
        transcript.push_assistant(text.clone());
        let ready = self.orchestrator.snapshot().await.ready_to_calculate();

        Ok(SendOutcome::Replied {
            text,
            status: turn.status,
            ready,
        })
    }
}
