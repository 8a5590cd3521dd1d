//! Storage and configuration adapters for ROI First.
//!
//! - [`InMemorySessionStore`]: process-lifetime store, used by tests and one-shot runs
//! - [`JsonFileSessionStore`]: single JSON document on disk, written atomically
//! - [`ConfigService`]: `config.toml` plus `ROI_FIRST_*` environment overrides
//! - [`RoiPaths`]: platform directories

pub mod config_service;
pub mod file_store;
pub mod memory_store;
pub mod paths;

pub use config_service::ConfigService;
pub use file_store::JsonFileSessionStore;
pub use memory_store::InMemorySessionStore;
pub use paths::RoiPaths;
