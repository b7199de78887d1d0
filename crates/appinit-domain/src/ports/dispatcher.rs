//! Dispatcher adapter port
//!
//! Abstraction over a pluggable transport. The service binds its procedure
//! bundle here and drives `start`/`stop`; client constructors obtain outbound
//! calling contexts through [`DispatcherAdapter::client_config`].

use crate::error::Result;
use crate::value_objects::{ClientConfig, Procedure};
use async_trait::async_trait;

/// Pluggable transport dispatcher
///
/// # Contract
///
/// - `register` may be called any number of times before `start`; afterwards
///   it fails with `Error::Transport`. Duplicate procedure names are rejected.
/// - `start` begins accepting inbound calls; bind/listen failures surface as
///   `Error::Transport`.
/// - `stop` stops admitting calls and drains in-flight ones, bounded by the
///   adapter's shutdown timeout.
/// - `client_config` fails with `Error::Binding` for an unknown peer.
#[async_trait]
pub trait DispatcherAdapter: Send + Sync {
    /// Name of the service this dispatcher serves
    fn name(&self) -> &str;

    /// Bind procedures to inbound dispatch paths
    fn register(&self, procedures: &[Procedure]) -> Result<()>;

    /// Names of all registered procedures, sorted
    fn procedures(&self) -> Vec<String>;

    /// Begin accepting inbound traffic
    async fn start(&self) -> Result<()>;

    /// Graceful stop
    async fn stop(&self) -> Result<()>;

    /// Outbound calling context for a configured peer
    fn client_config(&self, peer: &str) -> Result<ClientConfig>;
}
