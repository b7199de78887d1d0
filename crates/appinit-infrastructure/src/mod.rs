//! # Infrastructure Layer
//!
//! Technical machinery behind the service: the dependency container, the
//! configuration loader, logging setup and the default transport.
//!
//! ## Module Categories
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML/YAML configuration via figment |
//! | [`di`] | Typed binding table and singleton resolver |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Transport
//! | Module | Description |
//! |--------|-------------|
//! | [`transport`] | Line-delimited JSON over TCP dispatcher |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod transport;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use di::Container;
pub use error_ext::ErrorContext;
pub use logging::Logger;
pub use transport::TcpDispatcher;
