//! # appinit
//!
//! Wire independently registered components into a running RPC service.
//!
//! Components declare what they need through their constructor signatures.
//! The service resolves the graph once at start, hands the resulting
//! procedures to the dispatcher and serves until stopped.
//!
//! ## Example
//!
//! ```ignore
//! use appinit::{Logger, Procedure, Procedures, Service};
//! use std::sync::Arc;
//!
//! struct Greeter { logger: Arc<Logger> }
//!
//! fn new_greeter(logger: Arc<Logger>) -> anyhow::Result<Arc<Greeter>> {
//!     Ok(Arc::new(Greeter { logger }))
//! }
//!
//! fn new_procedures(greeter: Arc<Greeter>) -> anyhow::Result<Arc<Procedures>> {
//!     Ok(Arc::new(Procedures::new(vec![Procedure::from_fn("Greet", move |_ctx, body| {
//!         let greeter = Arc::clone(&greeter);
//!         async move {
//!             greeter.logger.info("greeting");
//!             Ok(body)
//!         }
//!     })])))
//! }
//!
//! let mut service = Service::from_path("appinit.toml")?;
//! service.register_type(new_greeter)?.register_type(new_procedures)?;
//! service.start().await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error taxonomy, ports and value objects
//! - `infrastructure` - Container, configuration, logging, TCP transport
//! - `server` - Service lifecycle and the hello demo

/// Domain layer - contracts and value objects
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use appinit_domain::*;
}

/// Infrastructure layer - DI, config, logging and transport
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use appinit_infrastructure::*;
}

/// Server layer - service lifecycle
///
/// Re-exports from the server crate for convenience
pub mod server {
    pub use appinit_server::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the pieces needed to assemble a service
pub use infrastructure::{AppConfig, ConfigLoader, Container, Logger, TcpDispatcher};
pub use server::{ExitPolicy, Service, run};
