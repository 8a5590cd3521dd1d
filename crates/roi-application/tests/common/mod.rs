#![allow(dead_code)]

use async_trait::async_trait;
use roi_core::agent::{AgentGateway, AgentReply, AgentRequest};
use roi_core::calculation::{CalculationGateway, CalculationRequest};
use roi_core::error::{Result, RoiError};
use roi_core::store::{SessionStore, StoreKey};
use roi_infrastructure::InMemorySessionStore;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn reply(value: Value) -> AgentReply {
    serde_json::from_value(value).unwrap()
}

pub fn agent_error() -> RoiError {
    RoiError::agent_call_failed(Some(502), "bad gateway")
}

/// Holds one request open until released.
pub struct Gate {
    pub message: String,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

/// Agent that answers from a script and records every request.
pub struct MockAgent {
    replies: Mutex<VecDeque<Result<AgentReply>>>,
    requests: Mutex<Vec<AgentRequest>>,
    gate: Option<Gate>,
}

impl MockAgent {
    pub fn new(replies: Vec<Result<AgentReply>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Requests carrying `message` wait for `release` after signalling `entered`.
    pub fn with_gate(mut self, message: &str) -> (Self, Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        self.gate = Some(Gate {
            message: message.to_string(),
            entered: entered.clone(),
            release: release.clone(),
        });
        (self, entered, release)
    }

    pub fn requests(&self) -> Vec<AgentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AgentGateway for MockAgent {
    async fn send_turn(&self, request: &AgentRequest) -> Result<AgentReply> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AgentReply::default()));

        if let Some(gate) = &self.gate {
            if request.message == gate.message {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
        }
        scripted
    }
}

/// Store whose first write of one key waits for `release` after signalling `entered`.
pub struct GatedStore {
    pub inner: InMemorySessionStore,
    key: StoreKey,
    armed: AtomicBool,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl GatedStore {
    pub fn new(key: StoreKey) -> (Self, Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let store = Self {
            inner: InMemorySessionStore::new(),
            key,
            armed: AtomicBool::new(true),
            entered: entered.clone(),
            release: release.clone(),
        };
        (store, entered, release)
    }
}

#[async_trait]
impl SessionStore for GatedStore {
    async fn get(&self, key: StoreKey) -> Result<Option<Value>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: StoreKey, value: Value) -> Result<()> {
        if key == self.key && self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: StoreKey) -> Result<()> {
        self.inner.remove(key).await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }
}

/// Store that refuses to remove anything.
#[derive(Default)]
pub struct ReadOnlyStore {
    pub inner: InMemorySessionStore,
}

#[async_trait]
impl SessionStore for ReadOnlyStore {
    async fn get(&self, key: StoreKey) -> Result<Option<Value>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: StoreKey, value: Value) -> Result<()> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: StoreKey) -> Result<()> {
        Err(RoiError::store(format!("{} is read-only", key)))
    }

    async fn clear(&self) -> Result<()> {
        Err(RoiError::store("store is read-only"))
    }
}

/// Calculation service returning a fixed response.
pub struct MockCalculator {
    response: Result<Value>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CalculationRequest>>,
}

impl MockCalculator {
    pub fn new(response: Result<Value>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CalculationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalculationGateway for MockCalculator {
    async fn calculate(&self, request: &CalculationRequest) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.response.clone()
    }
}

pub fn calculation_success(system: &str) -> Value {
    json!({
        "success": true,
        "system": system,
        "summary_text": "Collections run 20% faster",
        "tco_global": {
            "current_tco": 500000.0,
            "future_tco": 300000.0,
            "roi_total": 200000.0,
            "roi_percentage": 40.0
        },
        "dimensions": [{
            "dimension_id": "dso",
            "dimension_name": "Improved Collection Speed and DSO Reduction",
            "current_tco": 120000.0,
            "future_tco": 70000.0,
            "roi": 50000.0,
            "ia_improvement_factor": 0.42,
            "impacto_ia": 50000.0,
            "impact_percentage": 41.6,
            "description": "Fewer days sales outstanding"
        }],
        "metadata": {"model_version": "2"}
    })
}
