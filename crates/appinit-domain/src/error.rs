//! Error handling types
//!
//! One taxonomy is shared by every layer. Bootstrap failures map onto
//! [`Error::Config`], [`Error::Binding`], [`Error::Cycle`],
//! [`Error::Constructor`] and [`Error::Transport`]; the remaining variants are
//! ambient (I/O, JSON, lifecycle misuse, per-call handler failures).

use thiserror::Error;

/// Boxed error produced by user constructors and foreign libraries
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for appinit
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration blob missing or malformed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// No constructor registered for a required type, or an unknown outbound peer
    #[error("Binding error: {message}")]
    Binding {
        /// The type name or peer name that could not be bound
        target: String,
        /// Description of the binding error
        message: String,
        /// Resolution chain that led to the missing type (empty for peers)
        chain: Vec<String>,
    },

    /// Circular dependency detected during resolution
    #[error("Cycle error: circular dependency on `{type_name}` ({})", .chain.join(" -> "))]
    Cycle {
        /// The type at which the cycle closed
        type_name: String,
        /// Resolution chain, root first, ending with the repeated type
        chain: Vec<String>,
    },

    /// A registered constructor itself failed
    #[error("Constructor error: failed to construct `{type_name}` ({}): {source}", .chain.join(" -> "))]
    Constructor {
        /// The type whose constructor failed
        type_name: String,
        /// Resolution chain, root first, ending with the failing type
        chain: Vec<String>,
        /// The failure reported by the constructor
        #[source]
        source: BoxError,
    },

    /// Transport construction, bind/start or stop failure
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Operation invoked in the wrong lifecycle state
    #[error("Lifecycle error: {message}")]
    Lifecycle {
        /// Description of the lifecycle violation
        message: String,
    },

    /// A registered procedure failed while handling a call
    #[error("Handler error in `{procedure}`: {message}")]
    Handler {
        /// The procedure that failed
        procedure: String,
        /// Description of the failure
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal invariant violation
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Resolution error creation methods
impl Error {
    /// Create a binding error for a type with no registered constructor
    ///
    /// `chain` lists the types being resolved when the binding was missed,
    /// root first, ending with the missing type.
    pub fn missing_binding<S: Into<String>>(type_name: S, chain: Vec<String>) -> Self {
        let target = type_name.into();
        let message = if chain.len() > 1 {
            format!(
                "no constructor registered for `{target}` (required by {})",
                chain.join(" -> ")
            )
        } else {
            format!("no constructor registered for `{target}`")
        };
        Self::Binding {
            target,
            message,
            chain,
        }
    }

    /// Create a binding error for an outbound peer that is not configured
    pub fn unknown_peer<S: Into<String>>(peer: S) -> Self {
        let target = peer.into();
        Self::Binding {
            message: format!("outbound peer `{target}` is not configured"),
            target,
            chain: Vec::new(),
        }
    }

    /// Create a cycle error
    pub fn cycle<S: Into<String>>(type_name: S, chain: Vec<String>) -> Self {
        Self::Cycle {
            type_name: type_name.into(),
            chain,
        }
    }

    /// Create a constructor error wrapping the constructor's own failure
    pub fn constructor<S: Into<String>>(type_name: S, chain: Vec<String>, source: BoxError) -> Self {
        Self::Constructor {
            type_name: type_name.into(),
            chain,
            source,
        }
    }
}

// Transport, lifecycle and call error creation methods
impl Error {
    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error with source
    pub fn transport_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a lifecycle error
    pub fn lifecycle<S: Into<String>>(message: S) -> Self {
        Self::Lifecycle {
            message: message.into(),
        }
    }

    /// Create a handler error
    pub fn handler<P: Into<String>, S: Into<String>>(procedure: P, message: S) -> Self {
        Self::Handler {
            procedure: procedure.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Resolution chain carried by binding, cycle and constructor errors
    pub fn resolution_chain(&self) -> Option<&[String]> {
        match self {
            Self::Cycle { chain, .. } | Self::Constructor { chain, .. } => Some(chain.as_slice()),
            Self::Binding { chain, .. } if !chain.is_empty() => Some(chain.as_slice()),
            _ => None,
        }
    }

    /// Short label for the error category, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Binding { .. } => "binding",
            Self::Cycle { .. } => "cycle",
            Self::Constructor { .. } => "constructor",
            Self::Transport { .. } => "transport",
            Self::Lifecycle { .. } => "lifecycle",
            Self::Handler { .. } => "handler",
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
            Self::Internal { .. } => "internal",
        }
    }
}
