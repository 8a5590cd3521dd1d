//! Calculation endpoint contract and result types.

use crate::error::{Result, RoiError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured business-process payload collected by the conversation.
///
/// Its shape belongs to the remote agent; it is only ferried to the
/// calculation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedData(Value);

impl CollectedData {
    /// Wraps a value, treating JSON null as "nothing collected".
    pub fn from_value(value: Value) -> Option<Self> {
        if value.is_null() { None } else { Some(Self(value)) }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Request body for the calculation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub system: String,
    pub collected_data: CollectedData,
}

/// Global cost of ownership figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcoGlobal {
    pub current_tco: f64,
    pub future_tco: f64,
    pub roi_total: f64,
    pub roi_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<f64>,
}

/// Per-dimension outcome of the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub dimension_id: String,
    pub dimension_name: String,
    pub current_tco: f64,
    pub future_tco: f64,
    pub roi: f64,
    pub ia_improvement_factor: f64,
    pub impacto_ia: f64,
    pub impact_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of one successful calculation, replaced wholesale on the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub success: bool,
    pub system: String,
    pub summary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_details: Option<String>,
    pub tco_global: TcoGlobal,
    #[serde(default)]
    pub dimensions: Vec<DimensionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl CalculationResult {
    /// Interprets a raw calculation response.
    ///
    /// # Errors
    ///
    /// Returns `CalculationFailed` when the response reports `success=false`
    /// (carrying `metadata.error` when present) or does not match the
    /// expected shape.
    pub fn from_response(body: Value) -> Result<Self> {
        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
        if !success {
            let message = body
                .pointer("/metadata/error")
                .and_then(Value::as_str)
                .unwrap_or("Calculation failed");
            return Err(RoiError::calculation_failed(message));
        }

        serde_json::from_value(body).map_err(|e| {
            RoiError::calculation_failed(format!("unexpected calculation response: {e}"))
        })
    }
}

/// Remote ROI calculation service.
#[async_trait]
pub trait CalculationGateway: Send + Sync {
    /// Posts the collected data and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns `CalculationFailed` on transport, HTTP status or parse failures.
    async fn calculate(&self, request: &CalculationRequest) -> Result<Value>;
}
