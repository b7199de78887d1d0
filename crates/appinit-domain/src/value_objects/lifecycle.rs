//! Service lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a service
///
/// Transitions only move forward: `Created → Configured → Running → Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Constructed, constructors may still be registered
    Created,
    /// Framework singletons registered and resolved
    Configured,
    /// Dispatcher started and accepting calls
    Running,
    /// Dispatcher stopped
    Stopped,
}

impl LifecycleState {
    /// Whether constructors may still be registered
    pub fn accepts_registrations(self) -> bool {
        matches!(self, Self::Created)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "created",
            Self::Configured => "configured",
            Self::Running => "running",
            Self::Stopped => "stopped",
        };
        f.write_str(label)
    }
}
