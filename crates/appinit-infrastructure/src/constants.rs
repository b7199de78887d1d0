//! Infrastructure layer constants

use std::time::Duration;

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "appinit.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "appinit";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "APPINIT";

/// Separator for nested keys in environment variables (`APPINIT_SERVICE__NAME`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default service name
pub const DEFAULT_SERVICE_NAME: &str = "appinit";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV_FILTER: &str = "APPINIT_LOG";

// ============================================================================
// TRANSPORT CONSTANTS
// ============================================================================

/// Default drain bound for graceful shutdown, in seconds
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Default outbound call timeout when neither the peer nor the caller sets one
pub const DEFAULT_OUTBOUND_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum length of one line-delimited frame (4 MiB)
pub const MAX_FRAME_LENGTH: usize = 4 * 1024 * 1024;
