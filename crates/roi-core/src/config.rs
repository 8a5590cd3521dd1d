//! Service configuration model.
//!
//! Loading (file + environment overrides) lives in `roi-infrastructure`.

use crate::error::{Result, RoiError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_PATH: &str = "/chat";
pub const DEFAULT_CALCULATE_PATH: &str = "/calculate";

/// Where the agent and calculation endpoints live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub chat_path: String,
    pub calculate_path: String,
    /// Transport timeout in seconds. Unset means no timeout beyond the transport's own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            calculate_path: DEFAULT_CALCULATE_PATH.to_string(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub fn chat_url(&self) -> String {
        join_url(&self.base_url, &self.chat_path)
    }

    pub fn calculate_url(&self) -> String {
        join_url(&self.base_url, &self.calculate_path)
    }

    /// Rejects configurations that cannot produce a usable URL.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(RoiError::config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(RoiError::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
