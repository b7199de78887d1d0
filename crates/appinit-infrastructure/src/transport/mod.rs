//! Default dispatcher adapter
//!
//! Line-delimited JSON over TCP. One request per line, one response per line,
//! connections handled on their own tokio task.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Parsing and validation of the opaque `transport` section |
//! | [`types`] | Wire frames |
//! | [`tcp`] | [`TcpDispatcher`], the inbound side |
//! | [`outbound`] | [`TcpOutbound`], one route per configured peer |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use appinit_infrastructure::transport::TcpDispatcher;
//!
//! let dispatcher = TcpDispatcher::from_app_config(&config)?;
//! dispatcher.register(bundle.as_slice())?;
//! dispatcher.start().await?;
//!
//! let hello = dispatcher.client_config("hello")?;
//! let reply = hello.call(&CallContext::new(), "Echo", json!({"message": "hi"})).await?;
//!
//! dispatcher.stop().await?;
//! ```

pub mod config;
pub mod outbound;
pub mod tcp;
pub mod types;

pub use config::{InboundConfig, OutboundConfig, TransportConfig};
pub use outbound::TcpOutbound;
pub use tcp::TcpDispatcher;
pub use types::{WireRequest, WireResponse};
