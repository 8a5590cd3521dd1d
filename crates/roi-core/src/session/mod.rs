//! Session domain module.
//!
//! # Module Structure
//!
//! - `context`: Session-scoped selection (`SessionContext`, `AgentMode`, `CompanyProfile`)
//! - `message`: Display transcript types (`Turn`, `Transcript`)
//! - `conversation`: Agent-facing state round-tripped on every turn (`ConversationState`)
//! - `correction`: Correction round state (`CorrectionState`, `FieldDescriptor`)

mod context;
mod conversation;
mod correction;
mod message;

pub use context::{AgentMode, COMPANY_SIZES, CompanyProfile, SECTORS, SessionContext};
pub use conversation::{AgentState, ConversationId, ConversationState, HistoryRecord, StateOverrides};
pub use correction::{CorrectionContext, CorrectionKind, CorrectionState, FieldDescriptor};
pub use message::{MessageRole, Transcript, Turn};
