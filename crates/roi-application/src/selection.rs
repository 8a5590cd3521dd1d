//! Selection flow that precedes the conversation.
//!
//! Everything here reads and writes the injected [`SessionStore`]; the
//! conversation itself only ever sees the resulting [`SessionContext`].

use roi_core::calculation::CalculationResult;
use roi_core::catalog::{self, SystemDescriptor};
use roi_core::error::{Result, RoiError};
use roi_core::route::Route;
use roi_core::session::{AgentMode, CompanyProfile, SessionContext};
use roi_core::store::{self, SessionStore, StoreKey};
use std::sync::Arc;

/// Use case for choosing a system, an agent mode and a company profile.
#[derive(Clone)]
pub struct SelectionUseCase {
    store: Arc<dyn SessionStore>,
}

impl SelectionUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Selects a system and records its dimension labels.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an id missing from the catalog.
    pub async fn select_system(&self, system_id: &str) -> Result<&'static SystemDescriptor> {
        let descriptor =
            catalog::find(system_id).ok_or_else(|| RoiError::not_found("System", system_id))?;

        store::save(self.store.as_ref(), StoreKey::SystemId, descriptor.id).await?;
        store::save(
            self.store.as_ref(),
            StoreKey::Dimensions,
            descriptor.dimensions,
        )
        .await?;

        tracing::info!("[SelectionUseCase] Selected system {}", descriptor.id);
        Ok(descriptor)
    }

    /// Records the agent mode and company profile, returning the chat route.
    ///
    /// # Errors
    ///
    /// - `PreconditionMissing` when no system has been selected
    /// - `InvalidInput` when the profile breaks a selection rule
    pub async fn choose_agent(&self, mode: AgentMode, profile: CompanyProfile) -> Result<Route> {
        let system_id: String = store::load(self.store.as_ref(), StoreKey::SystemId)
            .await?
            .ok_or_else(|| RoiError::precondition_missing(StoreKey::SystemId.as_str()))?;
        profile.validate()?;

        store::save(self.store.as_ref(), StoreKey::CompanyProfile, &profile).await?;
        store::save(self.store.as_ref(), StoreKey::AgentMode, &mode).await?;

        tracing::info!(
            "[SelectionUseCase] {} agent chosen for {} ({})",
            mode,
            system_id,
            profile.name
        );
        Ok(Route::Chat { system: system_id })
    }

    /// Reads the session context back from the store.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionMissing` when the system id or the agent mode is absent.
    pub async fn load_context(&self) -> Result<SessionContext> {
        let system_id: String = store::load(self.store.as_ref(), StoreKey::SystemId)
            .await?
            .ok_or_else(|| RoiError::precondition_missing(StoreKey::SystemId.as_str()))?;
        let mode: AgentMode = store::load(self.store.as_ref(), StoreKey::AgentMode)
            .await?
            .ok_or_else(|| RoiError::precondition_missing(StoreKey::AgentMode.as_str()))?;
        let profile: Option<CompanyProfile> =
            store::load(self.store.as_ref(), StoreKey::CompanyProfile).await?;

        let context = SessionContext::new(system_id, mode);
        Ok(match profile {
            Some(profile) => context.with_company_profile(profile),
            None => context,
        })
    }

    pub async fn load_results(&self) -> Result<Option<CalculationResult>> {
        store::load(self.store.as_ref(), StoreKey::CalculationResult).await
    }

    /// Forgets the whole case: selection, collected data and results.
    pub async fn new_case(&self) -> Result<Route> {
        self.store.clear().await?;
        tracing::info!("[SelectionUseCase] Started a new case");
        Ok(Route::BusinessCase)
    }
}
