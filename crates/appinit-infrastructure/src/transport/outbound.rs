//! Outbound route to a configured peer

use super::config::OutboundConfig;
use super::types::{WireRequest, WireResponse};
use crate::constants::MAX_FRAME_LENGTH;
use crate::error_ext::ErrorContext;
use appinit_domain::error::{Error, Result};
use appinit_domain::ports::Outbound;
use appinit_domain::value_objects::CallContext;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::debug;

/// Route to one peer; each call uses its own connection
#[derive(Debug, Clone)]
pub struct TcpOutbound {
    peer: String,
    address: String,
    timeout: Duration,
}

impl TcpOutbound {
    /// Route to `peer` as configured
    pub fn new<S: Into<String>>(peer: S, config: &OutboundConfig) -> Self {
        Self {
            peer: peer.into(),
            address: config.address.clone(),
            timeout: config.timeout(),
        }
    }

    /// Peer address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Default per-call timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(&self, procedure: &str, body: Value, budget: Duration) -> Result<Value> {
        let stream = TcpStream::connect(&self.address)
            .await
            .with_transport_context(|| {
                format!("Failed to connect to peer `{}` at {}", self.peer, self.address)
            })?;
        let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_FRAME_LENGTH));

        let request = WireRequest {
            procedure: procedure.to_string(),
            body,
            timeout_ms: Some(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX)),
        };
        framed
            .send(serde_json::to_string(&request)?)
            .await
            .transport_context("Failed to send request")?;

        let line = framed
            .next()
            .await
            .ok_or_else(|| {
                Error::transport(format!("Peer `{}` closed the connection", self.peer))
            })?
            .transport_context("Failed to read response")?;

        let response: WireResponse = serde_json::from_str(&line)?;
        response.into_result(procedure)
    }
}

#[async_trait]
impl Outbound for TcpOutbound {
    fn peer(&self) -> &str {
        &self.peer
    }

    async fn call(&self, ctx: &CallContext, procedure: &str, body: Value) -> Result<Value> {
        let ctx = ctx.child().timeout(self.timeout);
        let budget = ctx.remaining().unwrap_or(self.timeout);
        debug!(peer = %self.peer, procedure, ?budget, "Outbound call");

        tokio::select! {
            () = ctx.cancellation().cancelled() => Err(Error::transport(format!(
                "Call to `{}` on peer `{}` was cancelled",
                procedure, self.peer
            ))),
            result = tokio::time::timeout(budget, self.exchange(procedure, body, budget)) => {
                result
                    .map_err(|_| Error::transport(format!(
                        "Call to `{}` on peer `{}` timed out after {:?}",
                        procedure, self.peer, budget
                    )))
                    .and_then(std::convert::identity)
            }
        }
    }
}
