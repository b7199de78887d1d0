//! Inbound handler port

use crate::error::Result;
use crate::value_objects::CallContext;
use async_trait::async_trait;
use serde_json::Value;

/// Request/response handler behind a procedure
///
/// Implementations must honour `ctx`: stop work once it is cancelled and pass
/// it (or a child) to any outbound call they make.
#[async_trait]
pub trait UnaryHandler: Send + Sync {
    /// Handle one call
    async fn handle(&self, ctx: CallContext, body: Value) -> Result<Value>;
}
