//! Recording dispatcher
//!
//! Keeps procedures in memory and routes `client_config` calls straight back
//! to them, so whole services can run without sockets.

use appinit_domain::error::{Error, Result};
use appinit_domain::ports::{DispatcherAdapter, Outbound};
use appinit_domain::value_objects::{CallContext, ClientConfig, Procedure};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of events
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

type Table = Arc<Mutex<BTreeMap<String, Procedure>>>;

pub struct RecordingDispatcher {
    journal: Journal,
    procedures: Table,
    register_calls: AtomicUsize,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    started: AtomicBool,
    fail_start: bool,
}

impl RecordingDispatcher {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            procedures: Arc::default(),
            register_calls: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            started: AtomicBool::new(false),
            fail_start: false,
        }
    }

    /// Dispatcher whose `start` reports a bind failure
    pub fn failing_start(journal: Journal) -> Self {
        Self {
            fail_start: true,
            ..Self::new(journal)
        }
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DispatcherAdapter for RecordingDispatcher {
    fn name(&self) -> &str {
        "recording"
    }

    fn register(&self, procedures: &[Procedure]) -> Result<()> {
        if self.started.load(Ordering::SeqCst) {
            return Err(Error::transport("already started"));
        }
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        let mut table = self.procedures.lock().unwrap();
        for procedure in procedures {
            self.journal.record(format!("register:{}", procedure.name()));
            table.insert(procedure.name().to_string(), procedure.clone());
        }
        Ok(())
    }

    fn procedures(&self) -> Vec<String> {
        self.procedures.lock().unwrap().keys().cloned().collect()
    }

    async fn start(&self) -> Result<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.record("start");
        if self.fail_start {
            return Err(Error::transport("Failed to bind inbound 127.0.0.1:8086"));
        }
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.record("stop");
        Ok(())
    }

    fn client_config(&self, peer: &str) -> Result<ClientConfig> {
        if peer != "hello" {
            return Err(Error::unknown_peer(peer));
        }
        let outbound = Arc::new(Loopback {
            peer: peer.to_string(),
            procedures: Arc::clone(&self.procedures),
        });
        Ok(ClientConfig::new(self.name(), peer, outbound))
    }
}

/// Outbound that calls procedures registered on the same dispatcher
struct Loopback {
    peer: String,
    procedures: Table,
}

#[async_trait]
impl Outbound for Loopback {
    fn peer(&self) -> &str {
        &self.peer
    }

    async fn call(&self, ctx: &CallContext, procedure: &str, body: Value) -> Result<Value> {
        let handler = self
            .procedures
            .lock()
            .unwrap()
            .get(procedure)
            .map(|p| Arc::clone(p.handler()))
            .ok_or_else(|| Error::handler(procedure, "Unknown procedure"))?;
        handler.handle(ctx.child(), body).await
    }
}
