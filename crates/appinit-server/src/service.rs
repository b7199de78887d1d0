//! Service lifecycle
//!
//! ```text
//! Created ──start()──► Configured ──► Running ──stop()──► Stopped
//!   │  register_type()*     │ resolve Procedures
//!   │                       │ dispatcher.register(..)
//!   └ framework singletons  └ dispatcher.start()
//! ```
//!
//! Any failure between `Created` and `Running` is fatal: it is logged with
//! its resolution chain and, under [`ExitPolicy::Terminate`], ends the process.

use crate::framework::{new_dispatcher, new_logger};
use appinit_domain::error::{Error, Result};
use appinit_domain::ports::DispatcherAdapter;
use appinit_domain::value_objects::{LifecycleState, Procedures};
use appinit_infrastructure::config::{AppConfig, ConfigLoader};
use appinit_infrastructure::di::{BindingInfo, Constructor, Container};
use appinit_infrastructure::logging::{Logger, init_logging};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// What happens after a fatal bootstrap error has been logged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Exit the process with status 1
    #[default]
    Terminate,
    /// Return the error to the caller of `start`
    ReturnError,
}

/// A service assembled from independently registered constructors
pub struct Service {
    config: Arc<AppConfig>,
    container: Container,
    state: LifecycleState,
    exit_policy: ExitPolicy,
    logger: Option<Arc<Logger>>,
    dispatcher: Option<Arc<dyn DispatcherAdapter>>,
}

impl Service {
    /// Service in the `Created` state with an empty container
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            container: Container::new(),
            state: LifecycleState::Created,
            exit_policy: ExitPolicy::default(),
            logger: None,
            dispatcher: None,
        }
    }

    /// Service configured from a TOML or YAML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = ConfigLoader::new().with_config_path(path).load()?;
        Ok(Self::new(config))
    }

    /// Choose how fatal bootstrap errors are handled
    #[must_use]
    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }

    /// Register a constructor
    ///
    /// Only allowed before `start`.
    pub fn register_type<Args, C>(&mut self, constructor: C) -> Result<&mut Self>
    where
        C: Constructor<Args>,
    {
        if !self.state.accepts_registrations() {
            return Err(Error::lifecycle(format!(
                "Cannot register constructors once the service is {}",
                self.state
            )));
        }
        self.container.register(constructor);
        Ok(self)
    }

    /// Resolve the graph and start serving
    pub async fn start(&mut self) -> Result<()> {
        if self.state != LifecycleState::Created {
            return Err(Error::lifecycle(format!(
                "Cannot start a service that is {}",
                self.state
            )));
        }

        if let Err(e) = init_logging(&self.config.logging) {
            // No subscriber is installed yet
            eprintln!(
                "{}: Failed to initialize logging: {e}",
                self.config.service.name
            );
            return Err(self.fatal("Failed to initialize logging", e));
        }
        self.register_framework();

        let logger = match self.container.resolve::<Logger>() {
            Ok(logger) => logger,
            Err(e) => return Err(self.fatal("Failed to build logger", e)),
        };
        self.logger = Some(Arc::clone(&logger));

        let dispatcher = match self.container.resolve::<dyn DispatcherAdapter>() {
            Ok(dispatcher) => dispatcher,
            Err(e) => {
                return Err(self.fatal("Failed to build dispatcher", surface_framework_error(e)));
            }
        };
        self.dispatcher = Some(Arc::clone(&dispatcher));
        self.state = LifecycleState::Configured;

        let procedures = match self.container.try_resolve::<Procedures>() {
            Ok(Some(procedures)) => procedures,
            Ok(None) => {
                let err = Error::missing_binding(
                    std::any::type_name::<Procedures>(),
                    vec![std::any::type_name::<Procedures>().to_string()],
                );
                return Err(self.fatal("No operations registered", err));
            }
            Err(e) => return Err(self.fatal("Failed to resolve operations", e)),
        };

        if let Err(e) = dispatcher.register(procedures.as_slice()) {
            return Err(self.fatal("Failed to register operations", e));
        }
        if let Err(e) = dispatcher.start().await {
            return Err(self.fatal("Failed to start dispatcher", e));
        }

        self.state = LifecycleState::Running;
        info!(
            service = %self.config.service.name,
            dispatcher = dispatcher.name(),
            procedures = ?procedures.names(),
            "Service started"
        );
        logger.info("Service started");
        Ok(())
    }

    /// Gracefully stop the dispatcher used during `start`
    ///
    /// The service ends up `Stopped` even when the dispatcher reports an error;
    /// that error is logged and returned.
    pub async fn stop(&mut self) -> Result<()> {
        if self.state != LifecycleState::Running {
            return Err(Error::lifecycle(format!(
                "Cannot stop a service that is {}",
                self.state
            )));
        }

        let dispatcher = self.container.resolve::<dyn DispatcherAdapter>()?;
        let result = dispatcher.stop().await;
        self.state = LifecycleState::Stopped;

        match &result {
            Ok(()) => info!(service = %self.config.service.name, "Service stopped"),
            Err(e) => error!(
                service = %self.config.service.name,
                kind = e.kind(),
                error = %e,
                "Service stopped with errors"
            ),
        }
        result
    }

    /// Framework logger, available once started
    pub fn logger(&self) -> Option<Arc<Logger>> {
        self.logger.clone()
    }

    /// Dispatcher adapter, available once started
    pub fn dispatcher(&self) -> Option<Arc<dyn DispatcherAdapter>> {
        self.dispatcher.clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The service's container
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Registered bindings, for diagnostics
    pub fn bindings(&self) -> Vec<BindingInfo> {
        self.container.bindings()
    }

    /// Service configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Bind config, logger and dispatcher unless the caller already did
    fn register_framework(&mut self) {
        if !self.container.is_bound::<AppConfig>() {
            self.container.register_instance(Arc::clone(&self.config));
        }
        if !self.container.is_bound::<Logger>() {
            self.container.register(new_logger);
        }
        if !self.container.is_bound::<dyn DispatcherAdapter>() {
            self.container.register(new_dispatcher);
        }
    }

    fn fatal(&self, context: &str, err: Error) -> Error {
        error!(
            service = %self.config.service.name,
            state = %self.state,
            kind = err.kind(),
            chain = ?err.resolution_chain(),
            error = %err,
            "{context}"
        );
        match self.exit_policy {
            ExitPolicy::Terminate => std::process::exit(1),
            ExitPolicy::ReturnError => err,
        }
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.config.service.name)
            .field("state", &self.state)
            .field("exit_policy", &self.exit_policy)
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

/// Unwrap a transport failure raised inside a framework constructor
fn surface_framework_error(err: Error) -> Error {
    match err {
        Error::Constructor {
            type_name,
            chain,
            source,
        } => match source.downcast::<Error>() {
            Ok(inner) if matches!(*inner, Error::Transport { .. }) => *inner,
            Ok(inner) => Error::Constructor {
                type_name,
                chain,
                source: inner,
            },
            Err(source) => Error::Constructor {
                type_name,
                chain,
                source,
            },
        },
        other => other,
    }
}
