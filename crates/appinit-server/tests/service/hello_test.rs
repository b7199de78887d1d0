//! Hello service over TCP

use crate::test_utils::test_fixtures::free_local_addr;
use appinit_domain::value_objects::{CallContext, LifecycleState};
use appinit_infrastructure::config::AppConfig;
use appinit_server::hello::{self, EchoClient, EchoRequest, EchoResponse, HELLO_PEER};
use appinit_server::{ExitPolicy, Service};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;

fn hello_config(address: &str) -> AppConfig {
    AppConfig::default()
        .with_service_name("hello")
        .with_transport(json!({
            "inbounds": [{ "address": address }],
            "outbounds": { HELLO_PEER: { "address": address, "timeout_ms": 2000 } }
        }))
}

#[tokio::test]
async fn test_hello_echo_over_tcp() {
    let address = free_local_addr();
    let mut service = Service::new(hello_config(&address)).with_exit_policy(ExitPolicy::ReturnError);
    hello::register(&mut service).unwrap();
    service.start().await.unwrap();

    let dispatcher = service.dispatcher().unwrap();
    assert_eq!(dispatcher.name(), "hello");
    assert_eq!(dispatcher.procedures(), vec![hello::ECHO_PROCEDURE.to_string()]);

    let client = service.container().get::<EchoClient>().unwrap();
    let ctx = CallContext::with_timeout(Duration::from_secs(1));
    let response = client
        .echo(
            &ctx,
            &EchoRequest {
                message: "Hello world".into(),
                count: 1,
            },
        )
        .await
        .unwrap();

    assert_eq!(
        response,
        EchoResponse {
            message: "Hello world".into(),
            count: 2
        }
    );

    service.stop().await.unwrap();
    assert_eq!(service.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn test_from_path_toml() {
    let address = free_local_addr();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hello.toml");
    std::fs::write(
        &path,
        format!(
            r#"
[service]
name = "hello"
shutdown_timeout_secs = 2

[transport]
inbounds = [{{ address = "{address}" }}]

[transport.outbounds.hello]
address = "{address}"
"#
        ),
    )
    .unwrap();

    let mut service = Service::from_path(&path)
        .unwrap()
        .with_exit_policy(ExitPolicy::ReturnError);
    assert_eq!(service.config().service.shutdown_timeout_secs, 2);

    hello::register(&mut service).unwrap();
    service.start().await.unwrap();

    let client = service.container().get::<EchoClient>().unwrap();
    let response = client
        .echo(
            &CallContext::new(),
            &EchoRequest {
                message: "from toml".into(),
                count: 41,
            },
        )
        .await
        .unwrap();
    assert_eq!(response.count, 42);

    service.stop().await.unwrap();
}

#[tokio::test]
async fn test_bind_failure_is_fatal() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let taken = listener.local_addr().unwrap().to_string();

    let mut service = Service::new(hello_config(&taken)).with_exit_policy(ExitPolicy::ReturnError);
    hello::register(&mut service).unwrap();

    assert!(matches!(
        service.start().await,
        Err(appinit_domain::error::Error::Transport { .. })
    ));
    assert_eq!(service.state(), LifecycleState::Configured);
}

#[test]
fn test_from_path_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        Service::from_path(temp_dir.path().join("missing.yaml")),
        Err(appinit_domain::error::Error::Config { .. })
    ));
}
