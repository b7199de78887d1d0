//! Server initialization
//!
//! Loads configuration, assembles the hello service, runs it until a
//! shutdown signal arrives and then stops it gracefully.

use crate::hello::{self, EchoClient, EchoRequest};
use crate::service::Service;
use appinit_domain::error::Error;
use appinit_domain::value_objects::CallContext;
use appinit_infrastructure::config::{AppConfig, ConfigLoader};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Time allowed for the optional startup echo call
const CALL_TIMEOUT: Duration = Duration::from_secs(1);

/// Run the hello service
///
/// When the configuration has no transport section the service listens on
/// and calls [`hello::HELLO_ADDRESS`]. With `call` set, one echo call is made
/// through the outbound client after start and the response is printed.
pub async fn run(
    config_path: Option<&Path>,
    call: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;

    let mut service = Service::new(config);
    hello::register(&mut service)?;
    service.start().await?;

    if let Some(message) = call {
        echo_once(&service, message).await;
    }

    wait_for_shutdown_signal().await?;
    info!("Shutdown signal received");
    service.stop().await?;
    Ok(())
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>) -> Result<AppConfig, Error> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;

    let has_transport = config
        .transport
        .as_object()
        .is_some_and(|section| !section.is_empty());
    if has_transport {
        Ok(config)
    } else {
        info!(address = hello::HELLO_ADDRESS, "No transport configured, using defaults");
        Ok(config.with_transport(hello::default_transport()))
    }
}

async fn echo_once(service: &Service, message: String) {
    let Some(client) = service.container().get::<EchoClient>() else {
        warn!("Echo client is not available");
        return;
    };
    let caller = service
        .dispatcher()
        .map(|dispatcher| dispatcher.name().to_string())
        .unwrap_or_default();

    let ctx = CallContext::with_timeout(CALL_TIMEOUT);
    let request = EchoRequest { message, count: 1 };
    match client.echo(&ctx, &request).await {
        Ok(response) => println!("{caller} <- {}: {response:?}", client.peer()),
        Err(e) => warn!(error = %e, "Echo call failed"),
    }
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
