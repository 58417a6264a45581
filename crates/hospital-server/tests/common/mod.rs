//! Shared harness: an in-process recording store and an ephemeral server.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hospital_server::{AppConfig, AppState, build_app};
use hospital_storage::{
    Procedure, ProcedureCall, ProcedureStore, Row, SqlValue, StorageError,
};
use tokio::task::JoinHandle;

/// Records every call and answers with scripted rows or a scripted failure.
#[derive(Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<ProcedureCall>>,
    rows: Mutex<HashMap<Procedure, Vec<Row>>>,
    failure: Mutex<Option<StorageError>>,
    down: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_rows(self: &Arc<Self>, procedure: Procedure, rows: Vec<Vec<SqlValue>>) {
        self.rows.lock().unwrap().insert(procedure, rows);
    }

    pub fn fail_with(self: &Arc<Self>, err: StorageError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn set_down(self: &Arc<Self>, down: bool) {
        *self.down.lock().unwrap() = down;
    }

    /// Makes every call wait before answering.
    pub fn slow_down(self: &Arc<Self>, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<ProcedureCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: &ProcedureCall) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(call.clone());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failure.lock().unwrap().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProcedureStore for RecordingStore {
    async fn execute(&self, call: &ProcedureCall) -> Result<(), StorageError> {
        self.record(call).await
    }

    async fn query(&self, call: &ProcedureCall) -> Result<Vec<Row>, StorageError> {
        self.record(call).await?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&call.procedure())
            .cloned()
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        if *self.down.lock().unwrap() {
            Err(StorageError::connection("connection refused"))
        } else {
            Ok(())
        }
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

pub struct TestServer {
    pub base: String,
    pub store: Arc<RecordingStore>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(AppConfig::default()).await
    }

    pub async fn start_with(cfg: AppConfig) -> Self {
        let store = RecordingStore::new();
        let state = AppState::new(store.clone(), &cfg);
        let app = build_app(&cfg, state);

        // Bind to an ephemeral port
        let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind");
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await;
        });

        Self {
            base: format!("http://{addr}"),
            store,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}
