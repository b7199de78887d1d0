//! Framework constructors
//!
//! Registered by the service at start unless the caller bound its own
//! implementation of the same type first.

use appinit_domain::error::Result;
use appinit_domain::ports::DispatcherAdapter;
use appinit_infrastructure::config::AppConfig;
use appinit_infrastructure::logging::Logger;
use appinit_infrastructure::transport::TcpDispatcher;
use std::convert::Infallible;
use std::sync::Arc;

/// Service-scoped logger
pub fn new_logger(config: Arc<AppConfig>) -> std::result::Result<Arc<Logger>, Infallible> {
    Ok(Arc::new(Logger::new(config.service.name.clone())))
}

/// TCP dispatcher built from the `transport` section
pub fn new_dispatcher(config: Arc<AppConfig>) -> Result<Arc<dyn DispatcherAdapter>> {
    let dispatcher = TcpDispatcher::from_app_config(&config)?;
    Ok(Arc::new(dispatcher))
}
