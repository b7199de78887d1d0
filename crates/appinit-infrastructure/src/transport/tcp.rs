//! TCP dispatcher
//!
//! ## Lifecycle
//!
//! ```text
//! new ──register*──► start ──────────────► stop
//!                     │ bind inbounds       │ stop accepting, stop reading
//!                     │ spawn accept loops  │ wait for in-flight calls
//!                     ▼                     │ (bounded by shutdown timeout)
//!                  one task per connection  ▼
//!                                        abort leftovers
//! ```

use super::config::TransportConfig;
use super::outbound::TcpOutbound;
use super::types::{WireRequest, WireResponse};
use crate::config::AppConfig;
use crate::constants::MAX_FRAME_LENGTH;
use crate::error_ext::ErrorContext;
use appinit_domain::error::{Error, Result};
use appinit_domain::ports::{DispatcherAdapter, Outbound, UnaryHandler};
use appinit_domain::value_objects::{CallContext, ClientConfig, Procedure};
use async_trait::async_trait;
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LinesCodec};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Dispatcher serving line-delimited JSON over TCP
pub struct TcpDispatcher {
    name: String,
    config: TransportConfig,
    shutdown_timeout: Duration,
    procedures: Arc<DashMap<String, Procedure>>,
    outbounds: HashMap<String, Arc<TcpOutbound>>,
    started: AtomicBool,
    stopped: AtomicBool,
    local_addrs: OnceLock<Vec<SocketAddr>>,
    /// Stops admitting connections and requests
    shutdown: CancellationToken,
    /// Cancels calls still running at the drain deadline
    abort: CancellationToken,
    tracker: TaskTracker,
}

impl TcpDispatcher {
    /// Dispatcher for the service `name`
    pub fn new<S: Into<String>>(
        name: S,
        config: TransportConfig,
        shutdown_timeout: Duration,
    ) -> Self {
        let outbounds = config
            .outbounds
            .iter()
            .map(|(peer, outbound)| (peer.clone(), Arc::new(TcpOutbound::new(peer, outbound))))
            .collect();

        Self {
            name: name.into(),
            config,
            shutdown_timeout,
            procedures: Arc::new(DashMap::new()),
            outbounds,
            started: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            local_addrs: OnceLock::new(),
            shutdown: CancellationToken::new(),
            abort: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Dispatcher built from the opaque `transport` section
    pub fn from_value<S: Into<String>>(
        name: S,
        transport: &Value,
        shutdown_timeout: Duration,
    ) -> Result<Self> {
        let config = TransportConfig::from_value(transport)?;
        Ok(Self::new(name, config, shutdown_timeout))
    }

    /// Dispatcher for the service described by `config`
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Self::from_value(
            config.service.name.clone(),
            &config.transport,
            config.service.shutdown_timeout(),
        )
    }

    /// Parsed transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Bound inbound addresses; empty before start
    pub fn local_addrs(&self) -> Vec<SocketAddr> {
        self.local_addrs.get().cloned().unwrap_or_default()
    }

    /// Whether the dispatcher is accepting calls
    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::SeqCst) && !self.stopped.load(Ordering::SeqCst)
    }

    async fn bind_all(&self) -> Result<Vec<TcpListener>> {
        let mut listeners = Vec::with_capacity(self.config.inbounds.len());
        for addr in self.config.inbound_addrs()? {
            let listener = TcpListener::bind(addr)
                .await
                .with_transport_context(|| format!("Failed to bind inbound {addr}"))?;
            listeners.push(listener);
        }
        Ok(listeners)
    }
}

#[async_trait]
impl DispatcherAdapter for TcpDispatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, procedures: &[Procedure]) -> Result<()> {
        if self.started.load(Ordering::SeqCst) {
            return Err(Error::transport(format!(
                "Dispatcher `{}` is already started; procedures can no longer be registered",
                self.name
            )));
        }

        let mut batch: HashMap<&str, &Procedure> = HashMap::with_capacity(procedures.len());
        for procedure in procedures {
            let duplicate = self.procedures.contains_key(procedure.name());
            match batch.entry(procedure.name()) {
                Entry::Vacant(slot) if !duplicate => {
                    slot.insert(procedure);
                }
                _ => {
                    return Err(Error::transport(format!(
                        "Procedure `{}` is already registered",
                        procedure.name()
                    )));
                }
            }
        }

        for (name, procedure) in batch {
            debug!(dispatcher = %self.name, procedure = name, "Registered procedure");
            self.procedures.insert(name.to_string(), procedure.clone());
        }
        Ok(())
    }

    fn procedures(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .procedures
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    async fn start(&self) -> Result<()> {
        if self.started.load(Ordering::SeqCst) {
            return Err(Error::transport(format!(
                "Dispatcher `{}` is already started",
                self.name
            )));
        }

        let listeners = self.bind_all().await?;
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(Error::transport(format!(
                "Dispatcher `{}` is already started",
                self.name
            )));
        }

        let mut addrs = Vec::with_capacity(listeners.len());
        for listener in listeners {
            let addr = listener
                .local_addr()
                .transport_context("Failed to read bound address")?;
            addrs.push(addr);
            self.tracker.spawn(accept_loop(
                listener,
                Arc::clone(&self.procedures),
                self.shutdown.clone(),
                self.abort.clone(),
                self.tracker.clone(),
            ));
        }
        info!(
            dispatcher = %self.name,
            inbounds = ?addrs,
            procedures = self.procedures.len(),
            "Dispatcher started"
        );
        let _ = self.local_addrs.set(addrs);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(Error::transport(format!(
                "Dispatcher `{}` was never started",
                self.name
            )));
        }
        if self.stopped.swap(true, Ordering::SeqCst) {
            debug!(dispatcher = %self.name, "Dispatcher already stopped");
            return Ok(());
        }

        info!(dispatcher = %self.name, timeout = ?self.shutdown_timeout, "Stopping dispatcher");
        self.shutdown.cancel();
        self.tracker.close();

        if tokio::time::timeout(self.shutdown_timeout, self.tracker.wait())
            .await
            .is_err()
        {
            warn!(
                dispatcher = %self.name,
                in_flight = self.tracker.len(),
                "In-flight calls did not drain in time; cancelling"
            );
            self.abort.cancel();
            return Err(Error::transport(format!(
                "In-flight calls did not drain within {:?}",
                self.shutdown_timeout
            )));
        }

        info!(dispatcher = %self.name, "Dispatcher stopped");
        Ok(())
    }

    fn client_config(&self, peer: &str) -> Result<ClientConfig> {
        let outbound = self
            .outbounds
            .get(peer)
            .ok_or_else(|| Error::unknown_peer(peer))?;
        let outbound: Arc<dyn Outbound> = Arc::clone(outbound) as Arc<dyn Outbound>;
        Ok(ClientConfig::new(self.name.clone(), peer, outbound))
    }
}

impl Drop for TcpDispatcher {
    fn drop(&mut self) {
        self.shutdown.cancel();
        self.abort.cancel();
    }
}

impl std::fmt::Debug for TcpDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpDispatcher")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("procedures", &self.procedures.len())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

async fn accept_loop(
    listener: TcpListener,
    procedures: Arc<DashMap<String, Procedure>>,
    shutdown: CancellationToken,
    abort: CancellationToken,
    tracker: TaskTracker,
) {
    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tracker.spawn(serve_connection(
                        stream,
                        peer,
                        Arc::clone(&procedures),
                        shutdown.clone(),
                        abort.clone(),
                    ));
                }
                Err(e) => warn!(error = %e, "Failed to accept inbound connection"),
            }
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    procedures: Arc<DashMap<String, Procedure>>,
    shutdown: CancellationToken,
    abort: CancellationToken,
) {
    let connection = Uuid::new_v4();
    debug!(%connection, %peer, "Connection opened");
    let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_FRAME_LENGTH));

    loop {
        let line = tokio::select! {
            () = shutdown.cancelled() => break,
            frame = framed.next() => match frame {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    warn!(%connection, error = %e, "Failed to read request frame");
                    break;
                }
                None => break,
            }
        };

        let response = dispatch(&procedures, &line, &abort).await;
        let encoded = match serde_json::to_string(&response) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(%connection, error = %e, "Failed to encode response");
                break;
            }
        };
        if let Err(e) = framed.send(encoded).await {
            warn!(%connection, error = %e, "Failed to write response");
            break;
        }
    }
    debug!(%connection, "Connection closed");
}

async fn dispatch(
    procedures: &DashMap<String, Procedure>,
    line: &str,
    abort: &CancellationToken,
) -> WireResponse {
    let request: WireRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return WireResponse::failure(format!("Malformed request: {e}")),
    };

    let Some(handler) = procedures
        .get(&request.procedure)
        .map(|entry| Arc::clone(entry.handler()))
    else {
        return WireResponse::failure(format!("Unknown procedure `{}`", request.procedure));
    };

    let mut ctx = CallContext::with_cancellation(abort.child_token());
    if let Some(timeout_ms) = request.timeout_ms {
        ctx = ctx.timeout(Duration::from_millis(timeout_ms));
    }

    match invoke(handler, ctx, &request.procedure, request.body).await {
        Ok(body) => WireResponse::success(body),
        Err(Error::Handler { message, .. }) => WireResponse::failure(message),
        Err(e) => WireResponse::failure(e.to_string()),
    }
}

async fn invoke(
    handler: Arc<dyn UnaryHandler>,
    ctx: CallContext,
    procedure: &str,
    body: Value,
) -> Result<Value> {
    let cancellation = ctx.cancellation().clone();
    let deadline = ctx.remaining();
    let call = handler.handle(ctx, body);

    let bounded = async {
        match deadline {
            Some(left) => tokio::time::timeout(left, call)
                .await
                .map_err(|_| Error::handler(procedure, "Deadline exceeded"))
                .and_then(std::convert::identity),
            None => call.await,
        }
    };

    tokio::select! {
        () = cancellation.cancelled() => Err(Error::handler(procedure, "Call cancelled")),
        result = bounded => result,
    }
}
