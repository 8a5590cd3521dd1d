//! Use cases of the ROI business-case flow.
//!
//! - [`SelectionUseCase`]: system, agent mode and company profile selection
//! - [`TurnOrchestrator`]: one conversation's control state and turn sequencing
//! - [`ChatSession`]: transcript, session start/reset and presentation facts
//! - [`CalculationTrigger`]: hands collected data to the calculation service

pub mod calculation;
pub mod chat_session;
pub mod orchestrator;
pub mod selection;

pub use calculation::{CalculationOutcome, CalculationTrigger};
pub use chat_session::{ChatSession, ChatStatus, SendOutcome};
pub use orchestrator::{AppliedTurn, ChatSnapshot, SubmitOutcome, TurnOrchestrator};
pub use selection::SelectionUseCase;
