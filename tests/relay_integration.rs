//! Completion relay integration tests
//!
//! Drives the axum router with `tower::ServiceExt::oneshot` and stands a
//! `wiremock` server in for the upstream completion API.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use advisor_chat::relay::{router, RelayState};
use common::UPSTREAM_PATH;

fn relay_for(server: &MockServer) -> axum::Router {
    router(RelayState::new(
        format!("{}{}", server.uri(), UPSTREAM_PATH),
        Some("sk-test".to_string()),
        "OPENAI_API_KEY",
    ))
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_round_trip_passes_body_through_unchanged() {
    let server = MockServer::start().await;
    let upstream_body = r#"{"choices":[{"message":{"content":"hi"}}]}"#;

    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(upstream_body))
        .expect(1)
        .mount(&server)
        .await;

    let response = relay_for(&server)
        .oneshot(post(r#"{"messages":[{"role":"user","content":"hello"}]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(body_bytes(response).await, upstream_body.as_bytes());
}

#[tokio::test]
async fn test_upstream_request_carries_fixed_settings_and_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hello"}
            ],
            "max_tokens": 300,
            "temperature": 0.4
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let response = relay_for(&server)
        .oneshot(post(
            r#"{"messages":[{"role":"system","content":"be brief"},{"role":"user","content":"hello"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upstream_error_status_is_mirrored() {
    let server = MockServer::start().await;
    let upstream_body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string(upstream_body))
        .mount(&server)
        .await;

    let response = relay_for(&server)
        .oneshot(post(r#"{"messages":[]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(body_bytes(response).await, upstream_body.as_bytes());
}

#[tokio::test]
async fn test_unparsable_body_never_reaches_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = relay_for(&server)
        .oneshot(post("messages=hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        response.headers()["access-control-allow-methods"],
        "GET, POST, OPTIONS"
    );
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_messages_are_forwarded_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPSTREAM_PATH))
        .and(body_json(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "developer", "content": "be brief"},
                {"role": "user", "content": "hello", "name": "ana"}
            ],
            "max_tokens": 300,
            "temperature": 0.4
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let response = relay_for(&server)
        .oneshot(post(
            r#"{"messages":[{"role":"developer","content":"be brief"},{"role":"user","content":"hello","name":"ana"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_messages_field_is_500() {
    let server = MockServer::start().await;

    let response = relay_for(&server)
        .oneshot(post(r#"{"prompt":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_preflight_does_not_forward() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = relay_for(&server)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "Content-Type"
    );
    assert!(body_bytes(response).await.is_empty());
}
