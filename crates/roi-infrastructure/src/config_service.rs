//! Configuration service implementation.
//!
//! Loads [`ServiceConfig`] from `config.toml` and layers `ROI_FIRST_*`
//! environment variables on top.

use crate::paths::RoiPaths;
use roi_core::config::ServiceConfig;
use roi_core::error::{Result, RoiError};
use std::fs;
use std::path::Path;

pub const ENV_BASE_URL: &str = "ROI_FIRST_BASE_URL";
pub const ENV_CHAT_PATH: &str = "ROI_FIRST_CHAT_PATH";
pub const ENV_CALCULATE_PATH: &str = "ROI_FIRST_CALCULATE_PATH";
pub const ENV_TIMEOUT_SECS: &str = "ROI_FIRST_TIMEOUT_SECS";

/// Resolves the effective service configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    paths: RoiPaths,
}

impl ConfigService {
    pub fn new(paths: RoiPaths) -> Self {
        Self { paths }
    }

    /// Loads the configuration file, applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the file cannot be parsed, an override is
    /// malformed, or the result fails validation.
    pub fn load(&self) -> Result<ServiceConfig> {
        let path = self.paths.config_file()?;
        let config = Self::load_file(&path)?;
        let config = Self::apply_overrides(config, |name| std::env::var(name).ok())?;
        config.validate()?;

        tracing::debug!(
            "[ConfigService] Using agent endpoint {} and calculation endpoint {}",
            config.chat_url(),
            config.calculate_url()
        );
        Ok(config)
    }

    /// Reads a config file. A missing or empty file yields the defaults.
    pub fn load_file(path: &Path) -> Result<ServiceConfig> {
        if !path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                path.display()
            );
            return Ok(ServiceConfig::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ServiceConfig::default());
        }

        toml::from_str(&content)
            .map_err(|e| RoiError::config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Applies overrides looked up by variable name. Blank values are ignored.
    pub fn apply_overrides<F>(mut config: ServiceConfig, lookup: F) -> Result<ServiceConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = url.trim().to_string();
        }
        if let Some(path) = get(ENV_CHAT_PATH) {
            config.chat_path = path.trim().to_string();
        }
        if let Some(path) = get(ENV_CALCULATE_PATH) {
            config.calculate_path = path.trim().to_string();
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                RoiError::config(format!("{ENV_TIMEOUT_SECS} must be a whole number, got '{secs}'"))
            })?;
            config.timeout_secs = Some(secs);
        }
        Ok(config)
    }
}
