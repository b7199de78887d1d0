//! Structured logging with tracing
//!
//! Process-wide subscriber setup plus the [`Logger`] singleton that the
//! service registers in its container.

use crate::config::LoggingConfig;
use crate::constants::LOG_ENV_FILTER;
use appinit_domain::error::{Error, Result};
use tracing::{Level, Span, debug, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with the provided configuration
///
/// Installing a global subscriber can only happen once per process; later
/// calls validate the configuration and leave the existing subscriber alone.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_FILTER).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| std::path::Path::new(".")),
            path.file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("appinit.log")),
        )
    });

    // Layer types differ per branch
    let installed = if config.json_format {
        let stdout = fmt::layer().json().with_target(true).with_thread_ids(true);
        let registry = Registry::default().with(filter).with(stdout);
        match file_appender {
            Some(appender) => registry
                .with(fmt::layer().json().with_writer(appender).with_ansi(false))
                .try_init(),
            None => registry.try_init(),
        }
    } else {
        let stdout = fmt::layer().with_target(true).with_thread_ids(true);
        let registry = Registry::default().with(filter).with(stdout);
        match file_appender {
            Some(appender) => registry
                .with(fmt::layer().with_writer(appender).with_ansi(false))
                .try_init(),
            None => registry.try_init(),
        }
    };

    match installed {
        Ok(()) => info!("Logging initialized with level: {}", level),
        Err(e) => debug!(error = %e, "Global subscriber already installed"),
    }
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::config(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &std::path::Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}

/// Service-scoped logger
///
/// Events emitted through it are parented to a span carrying the service
/// name, so handler logs can be told apart when several services share a
/// process.
#[derive(Debug, Clone)]
pub struct Logger {
    service: String,
    span: Span,
}

impl Logger {
    /// Logger for the named service
    pub fn new<S: Into<String>>(service: S) -> Self {
        let service = service.into();
        let span = info_span!("service", name = %service);
        Self { service, span }
    }

    /// Service name
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Span every event is parented to
    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn debug(&self, message: &str) {
        debug!(parent: &self.span, "{message}");
    }

    pub fn info(&self, message: &str) {
        info!(parent: &self.span, "{message}");
    }

    pub fn warn(&self, message: &str) {
        warn!(parent: &self.span, "{message}");
    }

    pub fn error(&self, message: &str) {
        error!(parent: &self.span, "{message}");
    }
}
