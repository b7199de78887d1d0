//! Wire frames
//!
//! Each frame is one JSON object on one line.

use appinit_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound call frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    /// Procedure name
    pub procedure: String,
    /// Request body
    #[serde(default)]
    pub body: Value,
    /// Time the caller is willing to wait, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

/// Reply frame, carrying either a body or an error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResponse {
    /// Response body (if successful)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Error message (if failed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WireResponse {
    /// Create a success response
    pub fn success(body: Value) -> Self {
        Self {
            body: Some(body),
            error: None,
        }
    }

    /// Create an error response
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            body: None,
            error: Some(message.into()),
        }
    }

    /// Convert into the caller's result; errors are attributed to `procedure`
    pub fn into_result(self, procedure: &str) -> Result<Value> {
        match self.error {
            Some(message) => Err(Error::handler(procedure, message)),
            None => Ok(self.body.unwrap_or(Value::Null)),
        }
    }
}
