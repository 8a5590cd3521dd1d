//! Session-scoped key/value store.
//!
//! Holds the small values that outlive a single screen: the selection,
//! the collected data and the last calculation result. Each key is
//! independently clearable.

use crate::error::{Result, RoiError};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Keys of the persisted session layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    SystemId,
    AgentMode,
    CompanyProfile,
    Dimensions,
    CollectedData,
    CalculationResult,
}

impl StoreKey {
    pub const ALL: [StoreKey; 6] = [
        StoreKey::SystemId,
        StoreKey::AgentMode,
        StoreKey::CompanyProfile,
        StoreKey::Dimensions,
        StoreKey::CollectedData,
        StoreKey::CalculationResult,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::SystemId => "roiSystem",
            StoreKey::AgentMode => "roiType",
            StoreKey::CompanyProfile => "companyInfo",
            StoreKey::Dimensions => "roiDimensions",
            StoreKey::CollectedData => "collectedData",
            StoreKey::CalculationResult => "calculationData",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Injected key/value storage for session data.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: StoreKey) -> Result<Option<Value>>;

    async fn set(&self, key: StoreKey, value: Value) -> Result<()>;

    async fn remove(&self, key: StoreKey) -> Result<()>;

    /// Removes every key.
    async fn clear(&self) -> Result<()>;
}

/// Reads and deserializes a stored value.
pub async fn load<T>(store: &dyn SessionStore, key: StoreKey) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| RoiError::store(format!("corrupt value under '{key}': {e}"))),
        None => Ok(None),
    }
}

/// Serializes and stores a value.
pub async fn save<T>(store: &dyn SessionStore, key: StoreKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    store.set(key, serde_json::to_value(value)?).await
}
