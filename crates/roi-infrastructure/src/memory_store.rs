//! In-memory session store.

use async_trait::async_trait;
use roi_core::error::Result;
use roi_core::store::{SessionStore, StoreKey};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session store that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<Mutex<HashMap<StoreKey, Value>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: StoreKey) -> Result<Option<Value>> {
        Ok(self.entries.lock().await.get(&key).cloned())
    }

    async fn set(&self, key: StoreKey, value: Value) -> Result<()> {
        self.entries.lock().await.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: StoreKey) -> Result<()> {
        self.entries.lock().await.remove(&key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.lock().await.clear();
        Ok(())
    }
}
