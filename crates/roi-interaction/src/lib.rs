//! HTTP clients for the remote services ROI First talks to.
//!
//! - [`ChatApiAgent`]: the conversational agent's turn endpoint
//! - [`CalculationApiClient`]: the ROI calculation endpoint

mod calculation_api;
mod chat_api_agent;
mod http;

pub use calculation_api::CalculationApiClient;
pub use chat_api_agent::ChatApiAgent;
