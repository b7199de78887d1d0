//! Configuration
//!
//! [`AppConfig`] is loaded with figment from defaults, a TOML or YAML file and
//! `APPINIT_`-prefixed environment variables. The `transport` section is kept
//! as an opaque JSON value and only interpreted by the dispatcher adapter.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, ServiceConfig};
