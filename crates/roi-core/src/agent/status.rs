//! Classification of the agent's `status` signal.

use serde::{Deserialize, Serialize};

/// The "all data gathered" statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSignal {
    Completed,
    DataCompleted,
}

/// Classified outcome of one agent reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    /// All required data has been gathered.
    Completed(CompletionSignal),
    /// Some submitted fields failed validation.
    AwaitingCorrections,
    /// Required fields were never supplied.
    AwaitingMissingData,
    /// The agent explicitly validated the collected data.
    ValidatedComplete,
    /// Anything else, including an absent status. Causes no state change.
    Unclassified,
}

impl ReplyStatus {
    pub fn classify(status: Option<&str>) -> Self {
        match status {
            Some("completed") => ReplyStatus::Completed(CompletionSignal::Completed),
            Some("data_completed") => ReplyStatus::Completed(CompletionSignal::DataCompleted),
            Some("validated_complete") => ReplyStatus::ValidatedComplete,
            Some("awaiting_corrections") => ReplyStatus::AwaitingCorrections,
            Some("awaiting_missing_data") => ReplyStatus::AwaitingMissingData,
            _ => ReplyStatus::Unclassified,
        }
    }

    /// Whether collected data should be looked for in the reply.
    ///
    /// An explicit validation success may also carry the final data.
    pub fn offers_collected_data(self) -> bool {
        matches!(
            self,
            ReplyStatus::Completed(_) | ReplyStatus::ValidatedComplete
        )
    }
}
