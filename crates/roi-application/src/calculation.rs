//! Calculation trigger.

use roi_core::calculation::{CalculationGateway, CalculationRequest, CalculationResult, CollectedData};
use roi_core::error::{Result, RoiError};
use roi_core::route::Route;
use roi_core::store::{self, SessionStore, StoreKey};
use std::sync::Arc;

/// A calculation that succeeded and was persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    pub result: CalculationResult,
    /// Where the results are shown.
    pub next: Route,
}

/// Hands collected data to the calculation service and persists the result.
#[derive(Clone)]
pub struct CalculationTrigger {
    gateway: Arc<dyn CalculationGateway>,
    store: Arc<dyn SessionStore>,
}

impl CalculationTrigger {
    pub fn new(gateway: Arc<dyn CalculationGateway>, store: Arc<dyn SessionStore>) -> Self {
        Self { gateway, store }
    }

    /// Runs one calculation for `system_id`.
    ///
    /// On success the result replaces any earlier one under
    /// [`StoreKey::CalculationResult`].
    ///
    /// # Errors
    ///
    /// Returns `CalculationFailed` when no data has been collected (without
    /// calling the service), when the call fails, or when the service reports
    /// a failure. Nothing is persisted in those cases.
    pub async fn calculate(
        &self,
        collected: Option<&CollectedData>,
        system_id: &str,
    ) -> Result<CalculationOutcome> {
        let Some(collected) = collected else {
            return Err(RoiError::calculation_failed(
                "No data available for calculation",
            ));
        };

        tracing::info!("[CalculationTrigger] Starting ROI calculation for {}", system_id);

        let request = CalculationRequest {
            system: system_id.to_string(),
            collected_data: collected.clone(),
        };
        let body = self.gateway.calculate(&request).await.map_err(|e| match e {
            RoiError::CalculationFailed(_) => e,
            other => RoiError::calculation_failed(other.to_string()),
        })?;

        let result = CalculationResult::from_response(body).inspect_err(|e| {
            tracing::warn!("[CalculationTrigger] {}", e);
        })?;

        store::save(self.store.as_ref(), StoreKey::CalculationResult, &result).await?;
        tracing::info!(
            "[CalculationTrigger] Calculation completed: roi_total={}",
            result.tco_global.roi_total
        );

        Ok(CalculationOutcome {
            result,
            next: Route::Overview {
                system: system_id.to_string(),
            },
        })
    }
}
