//! Shared HTTP plumbing for the endpoint clients.

use reqwest::{Client, StatusCode};
use roi_core::config::ServiceConfig;
use roi_core::error::{Result, RoiError};
use serde::Deserialize;
use std::time::Duration;

/// Builds a client honouring the configured transport timeout.
pub(crate) fn build_client(config: &ServiceConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| RoiError::config(format!("Failed to build HTTP client: {e}")))
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Extracts a readable message from an error response body.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let extracted = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| {
            b.error.or_else(|| {
                b.detail.map(|d| match d {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
            })
        });

    match extracted {
        Some(message) => message,
        None if body.trim().is_empty() => format!("HTTP error! status: {}", status.as_u16()),
        None => body.trim().to_string(),
    }
}
