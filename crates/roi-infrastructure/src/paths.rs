//! Unified path management for ROI First files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/roi-first/        # Config directory
//! └── config.toml             # Service endpoints
//!
//! ~/.local/share/roi-first/   # Data directory
//! └── session.json            # Persisted session store
//! ```

use roi_core::error::{Result, RoiError};
use std::path::PathBuf;

const APP_DIR: &str = "roi-first";

/// Resolves the platform config and data directories.
///
/// Both roots can be overridden, which tests and the `--data-dir` flag use.
#[derive(Debug, Clone, Default)]
pub struct RoiPaths {
    config_root: Option<PathBuf>,
    data_root: Option<PathBuf>,
}

impl RoiPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `dir` for both config and data files.
    pub fn with_root(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            config_root: Some(dir.clone()),
            data_root: Some(dir),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_root = Some(dir.into());
        self
    }

    /// Returns the configuration directory (e.g. `~/.config/roi-first/`).
    ///
    /// # Errors
    ///
    /// Returns `Config` when the platform directory cannot be determined.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.config_root {
            Some(dir) => Ok(dir.clone()),
            None => dirs::config_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| RoiError::config("Cannot find config directory")),
        }
    }

    /// Returns the data directory (e.g. `~/.local/share/roi-first/`).
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_root {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| RoiError::config("Cannot find data directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn session_file(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("session.json"))
    }
}
