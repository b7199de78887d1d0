//! # appinit Domain Layer
//!
//! Contracts shared by the container, the service lifecycle and the transport:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`ports`] | Traits for dispatchers, handlers and outbound routes |
//! | [`value_objects`] | Procedures, call contexts, client configs, lifecycle states |

pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{BoxError, Error, Result};
pub use ports::{DispatcherAdapter, Outbound, UnaryHandler};
pub use value_objects::{CallContext, ClientConfig, LifecycleState, Procedure, Procedures};
