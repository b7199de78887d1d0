//! # appinit Server
//!
//! Service bootstrap: register constructors, start, serve, stop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use appinit_server::{Service, hello};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut service = Service::new(hello::default_config());
//!     hello::register(&mut service)?;
//!     service.start().await?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     service.stop().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Service`] | Owns the container and drives the lifecycle |
//! | [`ExitPolicy`] | Exit or return on fatal bootstrap errors |

pub mod framework;
pub mod hello;
pub mod init;
pub mod service;

pub use init::run;
pub use service::{ExitPolicy, Service};
