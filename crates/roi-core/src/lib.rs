//! Domain layer for ROI First.
//!
//! Types, collaborator traits and pure logic shared by every other crate:
//! the session model, the agent and calculation contracts, the completion
//! detector, the session store abstraction and the static system catalog.

pub mod agent;
pub mod calculation;
pub mod catalog;
pub mod completion;
pub mod config;
pub mod error;
pub mod route;
pub mod session;
pub mod store;

// Re-export common error type
pub use error::{Result, RoiError};
