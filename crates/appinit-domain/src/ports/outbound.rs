//! Outbound route port

use crate::error::Result;
use crate::value_objects::CallContext;
use async_trait::async_trait;
use serde_json::Value;

/// Transport-specific route to one remote peer
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Logical peer name
    fn peer(&self) -> &str;

    /// Perform a unary call, bounded by the context deadline
    async fn call(&self, ctx: &CallContext, procedure: &str, body: Value) -> Result<Value>;
}
