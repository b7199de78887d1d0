//! Per-call context carried by inbound and outbound calls

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Deadline and cancellation carried through a single call
///
/// Inbound calls receive a context derived from the dispatcher's shutdown
/// token, so handlers observe cancellation when a drain deadline expires.
/// Outbound calls made from inside a handler should reuse (or derive from)
/// that context.
#[derive(Debug, Clone)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl CallContext {
    /// Context with no deadline and a fresh cancellation token
    pub fn new() -> Self {
        Self {
            deadline: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Context that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().timeout(timeout)
    }

    /// Context bound to an existing cancellation token
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            deadline: None,
            cancellation,
        }
    }

    /// Tighten the deadline to at most `timeout` from now
    ///
    /// An earlier existing deadline is kept.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < candidate => existing,
            _ => candidate,
        });
        self
    }

    /// Child context: same deadline, cancelled whenever the parent is
    pub fn child(&self) -> Self {
        Self {
            deadline: self.deadline,
            cancellation: self.cancellation.child_token(),
        }
    }

    /// Absolute deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline (zero once it has passed)
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline has passed
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    /// Whether the call was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Cancellation token for `select!`-style waiting
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Cancel this context and every child derived from it
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}
