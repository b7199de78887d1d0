//! Outbound calling context handed to client constructors

use crate::error::Result;
use crate::ports::Outbound;
use crate::value_objects::CallContext;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Outbound calling context for one configured peer
///
/// Obtained from `DispatcherAdapter::client_config` and used to build typed
/// clients. Cloning is cheap; every clone shares the same route.
#[derive(Clone)]
pub struct ClientConfig {
    caller: String,
    peer: String,
    outbound: Arc<dyn Outbound>,
}

impl ClientConfig {
    /// Create a client config for `peer`, issued by the service named `caller`
    pub fn new<C: Into<String>, P: Into<String>>(
        caller: C,
        peer: P,
        outbound: Arc<dyn Outbound>,
    ) -> Self {
        Self {
            caller: caller.into(),
            peer: peer.into(),
            outbound,
        }
    }

    /// Name of the calling service
    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// Logical peer name this config routes to
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Untyped unary call
    pub async fn call(&self, ctx: &CallContext, procedure: &str, body: Value) -> Result<Value> {
        self.outbound.call(ctx, procedure, body).await
    }

    /// Typed unary call: serializes the request and deserializes the response
    pub async fn call_typed<Req, Res>(
        &self,
        ctx: &CallContext,
        procedure: &str,
        request: &Req,
    ) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let body = serde_json::to_value(request)?;
        let response = self.call(ctx, procedure, body).await?;
        Ok(serde_json::from_value(response)?)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("caller", &self.caller)
            .field("peer", &self.peer)
            .finish_non_exhaustive()
    }
}
