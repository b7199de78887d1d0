//! TCP dispatcher tests
//!
//! Every server binds `127.0.0.1:0`; a second dispatcher with an outbound
//! route to the bound address acts as the client.

use appinit_domain::error::Error;
use appinit_domain::ports::DispatcherAdapter;
use appinit_domain::value_objects::{CallContext, Procedure};
use appinit_infrastructure::transport::{TcpDispatcher, TransportConfig};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

const SHUTDOWN: Duration = Duration::from_secs(5);

fn echo() -> Procedure {
    Procedure::from_fn("Echo", |_ctx, body: Value| async move { Ok(body) })
}

fn failing() -> Procedure {
    Procedure::from_fn("Fail", |_ctx, _body: Value| async move {
        Err(Error::handler("Fail", "nope"))
    })
}

fn server(shutdown: Duration) -> TcpDispatcher {
    TcpDispatcher::new(
        "server",
        TransportConfig::default().with_inbound("127.0.0.1:0"),
        shutdown,
    )
}

fn client_of(addr: SocketAddr) -> TcpDispatcher {
    TcpDispatcher::new(
        "client",
        TransportConfig::default().with_outbound("server", addr.to_string()),
        SHUTDOWN,
    )
}

async fn started(procedures: &[Procedure]) -> (TcpDispatcher, SocketAddr) {
    let server = server(SHUTDOWN);
    server.register(procedures).unwrap();
    server.start().await.unwrap();
    let addr = server.local_addrs()[0];
    (server, addr)
}

#[tokio::test]
async fn test_round_trip_through_client_config() {
    let (server, addr) = started(&[echo()]).await;
    let client = client_of(addr);

    let config = client.client_config("server").unwrap();
    assert_eq!(config.caller(), "client");
    assert_eq!(config.peer(), "server");

    let reply = config
        .call(&CallContext::new(), "Echo", json!({"message": "hi", "count": 1}))
        .await
        .unwrap();
    assert_eq!(reply, json!({"message": "hi", "count": 1}));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_handler_error_reaches_caller() {
    let (server, addr) = started(&[echo(), failing()]).await;
    let client = client_of(addr).client_config("server").unwrap();

    match client.call(&CallContext::new(), "Fail", Value::Null).await {
        Err(Error::Handler { procedure, message }) => {
            assert_eq!(procedure, "Fail");
            assert_eq!(message, "nope");
        }
        other => panic!("Expected Handler error, got {other:?}"),
    }

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_unknown_procedure() {
    let (server, addr) = started(&[echo()]).await;
    let client = client_of(addr).client_config("server").unwrap();

    let err = client
        .call(&CallContext::new(), "Missing", Value::Null)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown procedure `Missing`"));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_unknown_peer_is_a_binding_error() {
    let dispatcher = server(SHUTDOWN);
    assert!(matches!(
        dispatcher.client_config("billing"),
        Err(Error::Binding { ref target, .. }) if target == "billing"
    ));
}

#[tokio::test]
async fn test_duplicate_procedure_names_are_rejected() {
    let dispatcher = server(SHUTDOWN);
    dispatcher.register(&[echo()]).unwrap();

    assert!(matches!(
        dispatcher.register(&[echo()]),
        Err(Error::Transport { .. })
    ));
    assert!(matches!(
        dispatcher.register(&[failing(), failing()]),
        Err(Error::Transport { .. })
    ));
    assert_eq!(dispatcher.procedures(), vec!["Echo".to_string()]);
}

#[tokio::test]
async fn test_register_is_cumulative_before_start() {
    let dispatcher = server(SHUTDOWN);
    dispatcher.register(&[failing()]).unwrap();
    dispatcher.register(&[echo()]).unwrap();
    assert_eq!(dispatcher.procedures(), vec!["Echo", "Fail"]);
}

#[tokio::test]
async fn test_register_after_start_is_rejected() {
    let (server, _addr) = started(&[echo()]).await;

    assert!(matches!(
        server.register(&[failing()]),
        Err(Error::Transport { .. })
    ));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_bind_conflict_is_a_transport_error() {
    let (first, addr) = started(&[echo()]).await;

    let second = TcpDispatcher::new(
        "second",
        TransportConfig::default().with_inbound(addr.to_string()),
        SHUTDOWN,
    );
    assert!(matches!(second.start().await, Err(Error::Transport { .. })));
    assert!(!second.is_running());

    first.stop().await.unwrap();
}

#[tokio::test]
async fn test_stop_before_start_fails() {
    assert!(matches!(
        server(SHUTDOWN).stop().await,
        Err(Error::Transport { .. })
    ));
}

#[tokio::test]
async fn test_stop_drains_in_flight_calls() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let finished = Arc::new(AtomicBool::new(false));

    let slow = {
        let (entered, release, finished) =
            (Arc::clone(&entered), Arc::clone(&release), Arc::clone(&finished));
        Procedure::from_fn("Slow", move |_ctx, body: Value| {
            let (entered, release, finished) =
                (Arc::clone(&entered), Arc::clone(&release), Arc::clone(&finished));
            async move {
                entered.notify_one();
                release.notified().await;
                finished.store(true, Ordering::SeqCst);
                Ok(body)
            }
        })
    };

    let (server, addr) = started(&[slow]).await;
    let client = client_of(addr).client_config("server").unwrap();

    let call = tokio::spawn(async move {
        client
            .call(&CallContext::new(), "Slow", json!("payload"))
            .await
    });
    entered.notified().await;

    let server = Arc::new(server);
    let stopping = {
        let server = Arc::clone(&server);
        tokio::spawn(async move { server.stop().await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!stopping.is_finished());
    release.notify_one();

    stopping.await.unwrap().unwrap();
    assert!(finished.load(Ordering::SeqCst));
    assert_eq!(call.await.unwrap().unwrap(), json!("payload"));
}

#[tokio::test]
async fn test_stop_cancels_calls_past_the_deadline() {
    let stuck = Procedure::from_fn("Stuck", |_ctx, _body: Value| async move {
        std::future::pending::<()>().await;
        Ok(Value::Null)
    });

    let server = server(Duration::from_millis(100));
    server.register(&[stuck]).unwrap();
    server.start().await.unwrap();
    let client = client_of(server.local_addrs()[0])
        .client_config("server")
        .unwrap();

    let call = tokio::spawn(async move {
        client
            .call(&CallContext::new(), "Stuck", Value::Null)
            .await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(matches!(server.stop().await, Err(Error::Transport { .. })));
    assert!(call.await.unwrap().is_err());
}

#[tokio::test]
async fn test_outbound_timeout() {
    let sleepy = Procedure::from_fn("Sleepy", |_ctx, _body: Value| async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Value::Null)
    });
    let (server, addr) = started(&[sleepy]).await;
    let client = client_of(addr).client_config("server").unwrap();

    let ctx = CallContext::with_timeout(Duration::from_millis(100));
    let err = client.call(&ctx, "Sleepy", Value::Null).await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. } | Error::Handler { .. }));

    server.stop().await.unwrap();
}
