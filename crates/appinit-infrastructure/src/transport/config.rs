//! Transport configuration
//!
//! The service carries the `transport` section as an untyped value; this
//! module gives it a shape.
//!
//! ```toml
//! [transport]
//! inbounds = [{ address = "127.0.0.1:8086" }]
//!
//! [transport.outbounds.hello]
//! address = "127.0.0.1:8086"
//! timeout_ms = 1000
//! ```

use crate::constants::DEFAULT_OUTBOUND_TIMEOUT;
use crate::error_ext::ErrorContext;
use appinit_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

/// Inbound listeners and outbound peer routes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Addresses to listen on
    #[serde(default)]
    pub inbounds: Vec<InboundConfig>,

    /// Peer name to route
    #[serde(default)]
    pub outbounds: BTreeMap<String, OutboundConfig>,
}

/// One inbound listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InboundConfig {
    /// Socket address, `host:port`
    pub address: String,
}

/// Route to one remote peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutboundConfig {
    /// Peer address, `host:port`
    pub address: String,

    /// Default per-call timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl OutboundConfig {
    /// Per-call timeout, falling back to the transport default
    pub fn timeout(&self) -> Duration {
        self.timeout_ms
            .map_or(DEFAULT_OUTBOUND_TIMEOUT, Duration::from_millis)
    }
}

impl TransportConfig {
    /// Parse and validate the `transport` section
    ///
    /// A null section is treated as empty.
    pub fn from_value(value: &Value) -> Result<Self> {
        let config: Self = if value.is_null() {
            Self::default()
        } else {
            serde_json::from_value(value.clone())
                .transport_context("Invalid transport configuration")?
        };
        config.validate()?;
        Ok(config)
    }

    /// Add an inbound listener
    #[must_use]
    pub fn with_inbound<S: Into<String>>(mut self, address: S) -> Self {
        self.inbounds.push(InboundConfig {
            address: address.into(),
        });
        self
    }

    /// Add an outbound route
    #[must_use]
    pub fn with_outbound<P: Into<String>, S: Into<String>>(mut self, peer: P, address: S) -> Self {
        self.outbounds.insert(
            peer.into(),
            OutboundConfig {
                address: address.into(),
                timeout_ms: None,
            },
        );
        self
    }

    /// Validate addresses
    pub fn validate(&self) -> Result<()> {
        self.inbound_addrs()?;
        for (peer, outbound) in &self.outbounds {
            if peer.trim().is_empty() {
                return Err(Error::transport("Outbound peer name cannot be empty"));
            }
            if outbound.address.trim().is_empty() {
                return Err(Error::transport(format!(
                    "Outbound peer `{peer}` has an empty address"
                )));
            }
            if outbound.timeout_ms == Some(0) {
                return Err(Error::transport(format!(
                    "Outbound peer `{peer}` has a zero timeout"
                )));
            }
        }
        Ok(())
    }

    /// Inbound addresses, parsed
    pub fn inbound_addrs(&self) -> Result<Vec<SocketAddr>> {
        self.inbounds
            .iter()
            .map(|inbound| {
                inbound
                    .address
                    .parse::<SocketAddr>()
                    .with_transport_context(|| {
                        format!("Invalid inbound address `{}`", inbound.address)
                    })
            })
            .collect()
    }
}
