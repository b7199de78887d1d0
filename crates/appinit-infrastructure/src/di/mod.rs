//! Dependency Injection - Typed Binding Table
//!
//! The container maps output types to constructor functions and resolves the
//! transitive graph of inputs on demand, caching every instance so each type
//! is a singleton within its container.
//!
//! ## Architecture
//!
//! ```text
//! register(new_bundle)          resolve::<Procedures>()
//! register(new_handler)  ──→           │
//! register(new_client)           new_bundle(handler)
//!                                      │
//!                                new_handler(logger, client)
//!                                      │            │
//!                                   (cached)   new_client(dispatcher)
//! ```
//!
//! ## Key Principles
//!
//! - **Typed bindings**: constructor signatures are read at compile time via
//!   [`Constructor`]; no runtime reflection.
//! - **Owned, not global**: each `Service` owns exactly one [`Container`].
//! - **Last registration wins**: re-registering a type replaces its binding.
//! - **Fail with context**: missing bindings, cycles and constructor failures
//!   report the chain of types being resolved.

pub mod constructor;
pub mod container;
pub mod key;

pub use constructor::{Constructor, Instance};
pub use container::{BindingInfo, Container};
pub use key::TypeKey;
