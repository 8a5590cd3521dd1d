//! Completion detection.
//!
//! Reduces each agent reply into a correction-state update and, when the
//! agent signals that collection is complete, the collected data.

use crate::agent::{AgentReply, ReplyStatus};
use crate::calculation::CollectedData;
use crate::session::{AgentMode, CorrectionKind, CorrectionState};

/// What a reply does to the correction round.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionUpdate {
    Unchanged,
    Open(CorrectionState),
    Cleared,
}

/// Outcome of reducing one reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub status: ReplyStatus,
    pub correction: CorrectionUpdate,
    pub collected: Option<CollectedData>,
}

impl Reduction {
    /// Applies the reduction to the held correction state and collected data.
    ///
    /// Collected data from an earlier turn is kept when this reply carries none.
    pub fn apply_to(
        self,
        correction: &mut Option<CorrectionState>,
        collected: &mut Option<CollectedData>,
    ) {
        match self.correction {
            CorrectionUpdate::Unchanged => {}
            CorrectionUpdate::Open(state) => *correction = Some(state),
            CorrectionUpdate::Cleared => *correction = None,
        }
        if let Some(data) = self.collected {
            *collected = Some(data);
        }
    }
}

/// Classifies a reply and derives its state changes.
///
/// Completion extraction runs first, so a single reply can both deliver the
/// collected data and close the correction round.
pub fn reduce(reply: &AgentReply, mode: AgentMode) -> Reduction {
    let status = reply.classify();

    let collected = if status.offers_collected_data() {
        let extracted = extract_collected(reply, mode);
        if extracted.is_none() {
            tracing::debug!(
                "[CompletionDetector] Completion status {:?} without collected data for {} mode, ignoring",
                reply.status,
                mode
            );
        }
        extracted
    } else {
        None
    };

    let correction = match status {
        ReplyStatus::AwaitingCorrections => open_round(reply, CorrectionKind::InvalidValues),
        ReplyStatus::ValidatedComplete => CorrectionUpdate::Cleared,
        // The ready flag outranks a missing-data request, not invalid values.
        _ if reply.ready_for_calculation == Some(true) => CorrectionUpdate::Cleared,
        ReplyStatus::AwaitingMissingData => open_round(reply, CorrectionKind::MissingData),
        _ if collected.is_some() => CorrectionUpdate::Cleared,
        _ => CorrectionUpdate::Unchanged,
    };

    Reduction {
        status,
        correction,
        collected,
    }
}

fn open_round(reply: &AgentReply, kind: CorrectionKind) -> CorrectionUpdate {
    let fields = reply.missing_or_invalid_fields.clone().unwrap_or_default();
    match CorrectionState::open(kind, reply.data.clone(), fields) {
        Some(state) => CorrectionUpdate::Open(state),
        // A round with nothing to correct is not a round.
        None => CorrectionUpdate::Cleared,
    }
}

/// Guided agents nest the data in their state; expert agents return it at top level.
fn extract_collected(reply: &AgentReply, mode: AgentMode) -> Option<CollectedData> {
    let value = match mode {
        AgentMode::Guided => reply
            .current_state
            .as_ref()
            .and_then(|state| state.get("collected_data"))
            .cloned(),
        AgentMode::Expert => reply.data.clone(),
    };
    value.and_then(CollectedData::from_value)
}
