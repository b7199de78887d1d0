//! Unit tests for outbound client configs

use appinit_domain::error::{Error, Result};
use appinit_domain::ports::Outbound;
use appinit_domain::value_objects::{CallContext, ClientConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

/// Outbound that answers every call with `{procedure, body}`
struct Reflect;

#[async_trait]
impl Outbound for Reflect {
    fn peer(&self) -> &str {
        "mirror"
    }

    async fn call(&self, ctx: &CallContext, procedure: &str, body: Value) -> Result<Value> {
        if ctx.is_cancelled() {
            return Err(Error::transport("cancelled"));
        }
        Ok(json!({ "procedure": procedure, "body": body }))
    }
}

#[derive(Debug, Serialize)]
struct Question {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Reflection {
    procedure: String,
    body: Answer,
}

#[derive(Debug, Deserialize)]
struct Answer {
    text: String,
}

fn mirror() -> ClientConfig {
    ClientConfig::new("caller", "mirror", Arc::new(Reflect))
}

#[tokio::test]
async fn test_untyped_call() {
    let reply = mirror()
        .call(&CallContext::new(), "Ask", json!(1))
        .await
        .unwrap();
    assert_eq!(reply, json!({ "procedure": "Ask", "body": 1 }));
}

#[tokio::test]
async fn test_typed_call() {
    let reply: Reflection = mirror()
        .call_typed(
            &CallContext::new(),
            "Ask",
            &Question {
                text: "why".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(reply.procedure, "Ask");
    assert_eq!(reply.body.text, "why");
}

#[tokio::test]
async fn test_typed_call_rejects_unexpected_shape() {
    let result: Result<Vec<u8>> = mirror()
        .call_typed(&CallContext::new(), "Ask", &json!(null))
        .await;
    assert!(matches!(result, Err(Error::Json { .. })));
}

#[tokio::test]
async fn test_cancelled_context_reaches_outbound() {
    let ctx = CallContext::new();
    ctx.cancel();
    assert!(mirror().call(&ctx, "Ask", Value::Null).await.is_err());
}

#[test]
fn test_accessors_and_debug() {
    let config = mirror();
    assert_eq!(config.caller(), "caller");
    assert_eq!(config.peer(), "mirror");
    assert!(format!("{config:?}").contains("mirror"));
}
