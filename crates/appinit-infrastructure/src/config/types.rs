//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_SERVICE_NAME, DEFAULT_SHUTDOWN_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Service identity and lifecycle settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Transport section, handed unparsed to the dispatcher adapter
    #[serde(default = "empty_section")]
    pub transport: Value,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            logging: LoggingConfig::default(),
            transport: empty_section(),
        }
    }
}

impl AppConfig {
    /// Replace the transport section
    #[must_use]
    pub fn with_transport(mut self, transport: Value) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the service name
    #[must_use]
    pub fn with_service_name<S: Into<String>>(mut self, name: S) -> Self {
        self.service.name = name.into();
        self
    }
}

fn empty_section() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Service identity and lifecycle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name, used as dispatcher name and log span field
    pub name: String,

    /// Bound on draining in-flight calls during stop, in seconds
    pub shutdown_timeout_secs: u64,
}

impl ServiceConfig {
    /// Shutdown drain bound
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVICE_NAME.to_string(),
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
