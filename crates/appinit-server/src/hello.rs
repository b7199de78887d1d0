//! Hello service
//!
//! A single `Echo` procedure plus a typed client routed back to the same
//! process, wired entirely through constructors:
//!
//! ```text
//! Logger ─────────────┐
//!                     ├─► EchoHandler ─► Procedures
//! Dispatcher ─► EchoClient
//! ```

use crate::service::Service;
use appinit_domain::error::{Error, Result};
use appinit_domain::ports::{DispatcherAdapter, UnaryHandler};
use appinit_domain::value_objects::{CallContext, ClientConfig, Procedure, Procedures};
use appinit_infrastructure::config::AppConfig;
use appinit_infrastructure::logging::Logger;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::convert::Infallible;
use std::sync::Arc;

/// Name of the echo procedure
pub const ECHO_PROCEDURE: &str = "Echo";

/// Outbound peer the echo client calls
pub const HELLO_PEER: &str = "hello";

/// Service name used when no configuration file provides one
pub const HELLO_SERVICE: &str = "hello";

/// Default listen and peer address
pub const HELLO_ADDRESS: &str = "127.0.0.1:8086";

/// Echo request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoRequest {
    pub message: String,
    #[serde(default)]
    pub count: i64,
}

/// Echo response: the message back, with the count bumped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResponse {
    pub message: String,
    pub count: i64,
}

/// Typed client for the echo procedure
#[derive(Debug, Clone)]
pub struct EchoClient {
    config: ClientConfig,
}

impl EchoClient {
    /// Client bound to a peer's outbound configuration
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Peer this client calls
    pub fn peer(&self) -> &str {
        self.config.peer()
    }

    /// Call the peer's echo procedure
    pub async fn echo(&self, ctx: &CallContext, request: &EchoRequest) -> Result<EchoResponse> {
        self.config
            .call_typed(ctx, ECHO_PROCEDURE, request)
            .await
    }
}

/// Handler behind the echo procedure
#[derive(Debug)]
pub struct EchoHandler {
    logger: Arc<Logger>,
    client: Arc<EchoClient>,
}

impl EchoHandler {
    /// Handler logging through `logger`
    pub fn new(logger: Arc<Logger>, client: Arc<EchoClient>) -> Self {
        Self { logger, client }
    }

    /// Client for calling other hello instances
    pub fn client(&self) -> &Arc<EchoClient> {
        &self.client
    }

    /// Echo the message back with the count incremented
    pub fn echo(&self, request: EchoRequest) -> EchoResponse {
        EchoResponse {
            message: request.message,
            count: request.count.saturating_add(1),
        }
    }
}

#[async_trait]
impl UnaryHandler for EchoHandler {
    async fn handle(&self, _ctx: CallContext, body: Value) -> Result<Value> {
        let request: EchoRequest = serde_json::from_value(body)
            .map_err(|e| Error::handler(ECHO_PROCEDURE, format!("Invalid request: {e}")))?;
        self.logger
            .debug(&format!("Echo `{}` ({})", request.message, request.count));
        Ok(serde_json::to_value(self.echo(request))?)
    }
}

/// Constructor for the client bound to the `hello` peer
pub fn new_echo_client(dispatcher: Arc<dyn DispatcherAdapter>) -> Result<Arc<EchoClient>> {
    Ok(Arc::new(EchoClient::new(dispatcher.client_config(HELLO_PEER)?)))
}

/// Constructor for the echo handler
pub fn new_echo_handler(
    logger: Arc<Logger>,
    client: Arc<EchoClient>,
) -> std::result::Result<Arc<EchoHandler>, Infallible> {
    Ok(Arc::new(EchoHandler::new(logger, client)))
}

/// Constructor for the bundle exposing `Echo`
pub fn new_procedures(handler: Arc<EchoHandler>) -> std::result::Result<Arc<Procedures>, Infallible> {
    let handler: Arc<dyn UnaryHandler> = handler;
    Ok(Arc::new(Procedures::new(vec![Procedure::new(
        ECHO_PROCEDURE,
        handler,
    )])))
}

/// Register the hello components on `service`
pub fn register(service: &mut Service) -> Result<()> {
    service
        .register_type(new_echo_client)?
        .register_type(new_echo_handler)?
        .register_type(new_procedures)?;
    Ok(())
}

/// Transport section serving and calling [`HELLO_ADDRESS`]
pub fn default_transport() -> Value {
    json!({
        "inbounds": [{ "address": HELLO_ADDRESS }],
        "outbounds": { HELLO_PEER: { "address": HELLO_ADDRESS } }
    })
}

/// Configuration for a standalone hello service
pub fn default_config() -> AppConfig {
    AppConfig::default()
        .with_service_name(HELLO_SERVICE)
        .with_transport(default_transport())
}
