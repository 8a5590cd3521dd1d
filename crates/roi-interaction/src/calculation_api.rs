//! CalculationApiClient - REST client for the ROI calculation endpoint.

use crate::http::{build_client, error_message};
use async_trait::async_trait;
use reqwest::Client;
use roi_core::calculation::{CalculationGateway, CalculationRequest};
use roi_core::config::ServiceConfig;
use roi_core::error::{Result, RoiError};
use serde_json::Value;

/// Calculation gateway that posts collected data to the remote `calculate` endpoint.
#[derive(Clone)]
pub struct CalculationApiClient {
    client: Client,
    url: String,
}

impl CalculationApiClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(build_client(config)?, config.calculate_url()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CalculationGateway for CalculationApiClient {
    async fn calculate(&self, request: &CalculationRequest) -> Result<Value> {
        tracing::debug!(
            "[CalculationApiClient] POST {} (system={})",
            self.url,
            request.system
        );

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                RoiError::calculation_failed(format!("Calculation request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoiError::calculation_failed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_message(status, &body)
            )));
        }

        response.json().await.map_err(|err| {
            RoiError::calculation_failed(format!("Failed to parse calculation response: {err}"))
        })
    }
}
