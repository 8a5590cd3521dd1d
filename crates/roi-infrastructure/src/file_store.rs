//! Session store persisted as one JSON document.
//!
//! The document is an object keyed by [`StoreKey::as_str`]. Every mutation
//! rewrites it through a temporary file and an atomic rename, so a crash never
//! leaves a half-written session behind.

use async_trait::async_trait;
use roi_core::error::{Result, RoiError};
use roi_core::store::{SessionStore, StoreKey};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// File-backed session store with an in-memory cache.
#[derive(Debug, Clone)]
pub struct JsonFileSessionStore {
    path: PathBuf,
    /// Cached document. The lock is held across writes to keep them ordered.
    entries: Arc<Mutex<Map<String, Value>>>,
}

impl JsonFileSessionStore {
    /// Opens the store, loading the document if it exists.
    ///
    /// A missing or empty file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `Store` when the file exists but is not a JSON object.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let load_path = path.clone();
        let entries = tokio::task::spawn_blocking(move || load_document(&load_path))
            .await
            .map_err(|e| RoiError::internal(format!("Failed to join task: {}", e)))??;

        tracing::debug!(
            "[JsonFileSessionStore] Opened {} with {} keys",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the document, persists it, then commits it
    /// to the cache. A failed write leaves the cache untouched.
    async fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        change(&mut next);

        let path = self.path.clone();
        let body = serde_json::to_vec_pretty(&Value::Object(next.clone()))?;
        tokio::task::spawn_blocking(move || write_atomic(&path, &body))
            .await
            .map_err(|e| RoiError::internal(format!("Failed to join task: {}", e)))?
            .map_err(|e| {
                RoiError::store(format!(
                    "Failed to write {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        *entries = next;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn get(&self, key: StoreKey) -> Result<Option<Value>> {
        Ok(self.entries.lock().await.get(key.as_str()).cloned())
    }

    async fn set(&self, key: StoreKey, value: Value) -> Result<()> {
        self.update(|doc| {
            doc.insert(key.as_str().to_string(), value);
        })
        .await
    }

    async fn remove(&self, key: StoreKey) -> Result<()> {
        self.update(|doc| {
            doc.remove(key.as_str());
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.update(|doc| doc.clear()).await
    }
}

fn load_document(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(RoiError::store(format!(
            "{} does not contain a JSON object",
            path.display()
        ))),
        Err(e) => Err(RoiError::store(format!(
            "Failed to parse {}: {}",
            path.display(),
            e
        ))),
    }
}

fn write_atomic(path: &Path, body: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(body)?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)
}
