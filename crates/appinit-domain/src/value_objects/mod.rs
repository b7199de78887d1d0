//! Value objects shared across layers

pub mod client;
pub mod context;
pub mod lifecycle;
pub mod procedure;

pub use client::ClientConfig;
pub use context::CallContext;
pub use lifecycle::LifecycleState;
pub use procedure::{Procedure, Procedures};
