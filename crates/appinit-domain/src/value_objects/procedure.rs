//! Exposed operations and the bundle that aggregates them

use crate::error::Result;
use crate::ports::UnaryHandler;
use crate::value_objects::CallContext;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// A named operation bound to an inbound dispatch path
#[derive(Clone)]
pub struct Procedure {
    name: String,
    handler: Arc<dyn UnaryHandler>,
}

impl Procedure {
    /// Bind `handler` under `name`
    pub fn new<S: Into<String>>(name: S, handler: Arc<dyn UnaryHandler>) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }

    /// Bind an async closure under `name`
    pub fn from_fn<S, F, Fut>(name: S, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(CallContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self::new(name, Arc::new(FnHandler(f)))
    }

    /// Dispatch name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handler invoked for calls to this procedure
    pub fn handler(&self) -> &Arc<dyn UnaryHandler> {
        &self.handler
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> UnaryHandler for FnHandler<F>
where
    F: Fn(CallContext, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    async fn handle(&self, ctx: CallContext, body: Value) -> Result<Value> {
        (self.0)(ctx, body).await
    }
}

/// Every operation this process exposes
///
/// An ordinary bound type: register a constructor that takes the handler
/// types and returns `Procedures`, and the service resolves it at start.
#[derive(Debug, Clone, Default)]
pub struct Procedures {
    procedures: Vec<Procedure>,
}

impl Procedures {
    /// Bundle the given procedures, preserving order
    pub fn new(procedures: Vec<Procedure>) -> Self {
        Self { procedures }
    }

    /// Append the procedures exposed by another component
    #[must_use]
    pub fn with<I: IntoIterator<Item = Procedure>>(mut self, procedures: I) -> Self {
        self.procedures.extend(procedures);
        self
    }

    /// Procedures in registration order
    pub fn as_slice(&self) -> &[Procedure] {
        &self.procedures
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.procedures.iter().map(Procedure::name).collect()
    }

    /// Number of procedures
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    /// Whether the bundle is empty
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Iterate in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Procedure> {
        self.procedures.iter()
    }
}

impl FromIterator<Procedure> for Procedures {
    fn from_iter<I: IntoIterator<Item = Procedure>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Procedures {
    type Item = &'a Procedure;
    type IntoIter = std::slice::Iter<'a, Procedure>;

    fn into_iter(self) -> Self::IntoIter {
        self.procedures.iter()
    }
}
