//! Integration tests: drive the agent router in-process.

use ariadne_api::router;
use ariadne_kernel::AgentKernel;
use ariadne_types::config::{AgentConfig, AGENT_WIRE_CONTENT_TYPE};
use ariadne_types::message::AgentMessage;
use ariadne_types::messages::{TrustPingMessage, TrustPingResponseMessage};
use ariadne_wire::{encode_message, ThreadExt};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    let config = AgentConfig {
        max_body_bytes: 4096,
        ..AgentConfig::default()
    };
    router(Arc::new(AgentKernel::boot(config).unwrap()))
}

fn wire_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, AGENT_WIRE_CONTENT_TYPE)
        .body(body.into())
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_ping_reply_relayed() {
    let ping = TrustPingMessage::new(true);
    let response = app()
        .oneshot(wire_request(encode_message(&ping).unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        AGENT_WIRE_CONTENT_TYPE
    );

    let body = body_bytes(response).await;
    let registry = ariadne_wire::TypeRegistry::with_builtin_types();
    let reply = registry.decode(&body).unwrap();
    assert!(reply.downcast_ref::<TrustPingResponseMessage>().is_some());
    assert_eq!(reply.thread_id(), ping.id());
}

#[tokio::test]
async fn test_no_reply_is_empty_ok() {
    let ping = TrustPingMessage::new(false);
    let response = app()
        .oneshot(wire_request(encode_message(&ping).unwrap()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_wrong_method() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::CONTENT_TYPE, AGENT_WIRE_CONTENT_TYPE)
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST");
}

#[tokio::test]
async fn test_wrong_content_type() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"@type":"trust_ping"}"#))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_empty_body() {
    let response = app().oneshot(wire_request(Body::empty())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Empty message body");
}

#[tokio::test]
async fn test_malformed_message() {
    let response = app().oneshot(wire_request("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["stage"], "received");
    assert!(body["error"].as_str().unwrap().contains("Malformed message"));
}

#[tokio::test]
async fn test_unsupported_message_type() {
    let response = app()
        .oneshot(wire_request(r#"{"@type":"basic_message","@id":"b-1"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unsupported message type: basic_message"));
}

#[tokio::test]
async fn test_handler_failure() {
    // Forward envelopes without a target fail inside the handler.
    let response = app()
        .oneshot(wire_request(r#"{"@type":"forward","@id":"f-1","to":"","msg":{}}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["stage"], "routed");
}

#[tokio::test]
async fn test_oversized_body() {
    let response = app()
        .oneshot(wire_request(vec![b' '; 8192]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["agent"], "ariadne-agent");
}
