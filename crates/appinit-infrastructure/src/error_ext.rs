//! Error extension utilities
//!
//! Attach context to foreign errors while converting them into the domain
//! [`Error`].

use appinit_domain::error::{Error, Result};
use std::fmt;

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```ignore
/// use appinit_infrastructure::error_ext::ErrorContext;
///
/// let listener = TcpListener::bind(addr)
///     .await
///     .transport_context(format!("failed to bind inbound {addr}"))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context for configuration operations
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Add context for transport operations
    fn transport_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Add transport context with lazy evaluation
    fn with_transport_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::config_with_source(format!("{context}: {err}"), err))
    }

    fn transport_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::transport_with_source(format!("{context}: {err}"), err))
    }

    fn with_transport_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|err| Error::transport_with_source(format!("{}: {err}", f()), err))
    }
}
