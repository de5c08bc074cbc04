//! End-to-end tests of the HTTP adapter against an in-memory store

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use qsocial_core::{CreateMessageResponse, ErrorResponse, ListMessagesResponse, Message};
use qsocial_server::{build_router, Clock, MemoryStore, MessageService, MessageStore, StoreError};
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use uuid::Uuid;

const ORIGIN: &str = "http://localhost:3000";

/// Advances one second per call so successive posts never tie
struct StepClock(AtomicI64);

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        self.0.fetch_add(1_000, Ordering::SeqCst)
    }
}

/// Fails every operation
struct BrokenStore;

#[async_trait]
impl MessageStore for BrokenStore {
    fn kind(&self) -> &'static str {
        "broken"
    }

    async fn insert(&self, _message: &Message) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk on fire")))
    }

    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk on fire")))
    }
}

fn app_with(store: Arc<dyn MessageStore>) -> Router {
    let service = MessageService::with_clock(
        store,
        Arc::new(StepClock(AtomicI64::new(1_700_000_000_000))),
    );
    build_router(service, &[ORIGIN.to_string()]).unwrap()
}

fn app() -> Router {
    app_with(Arc::new(MemoryStore::new()))
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get() -> Request<Body> {
    Request::builder()
        .uri("/api/messages")
        .body(Body::empty())
        .unwrap()
}

async fn send<T: DeserializeOwned>(app: &Router, request: Request<Body>) -> (StatusCode, T) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn post_hello_returns_created_message() {
    let app = app();
    let (status, body): (_, CreateMessageResponse) =
        send(&app, post(r#"{"content":"hello"}"#)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.message.content, "hello");
    assert_eq!(body.message.id.get_version_num(), 4);
    assert!(body.message.created_at > 0);
}

#[tokio::test]
async fn id_is_a_uuid_string_on_the_wire() {
    let app = app();
    let (_, body): (_, serde_json::Value) = send(&app, post(r#"{"content":"hello"}"#)).await;

    let id = body["message"]["id"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
    assert!(body["message"]["createdAt"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn whitespace_content_is_rejected() {
    let app = app();
    let (status, body): (_, ErrorResponse) = send(&app, post(r#"{"content":"   "}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, "VALIDATION_ERROR");
    assert_eq!(body.error, "Message content cannot be empty");
}

#[tokio::test]
async fn overlong_content_is_rejected() {
    let app = app();
    let payload = serde_json::json!({ "content": "a".repeat(281) }).to_string();
    let (status, body): (_, ErrorResponse) = send(&app, post(&payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, "VALIDATION_ERROR");
    assert!(body.error.ends_with("280 characters or less"));
}

#[tokio::test]
async fn non_string_content_is_rejected() {
    let app = app();
    let (status, body): (_, ErrorResponse) = send(&app, post(r#"{"content":42}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "Message content must be a string");
}

#[tokio::test]
async fn malformed_json_is_internal_error() {
    let app = app();
    let (status, body): (_, ErrorResponse) = send(&app, post("{oops")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.code, "INTERNAL_ERROR");
}

#[tokio::test]
async fn three_posts_list_newest_first() {
    let app = app();
    let mut created = Vec::new();
    for text in ["one", "two", "three"] {
        let payload = serde_json::json!({ "content": text }).to_string();
        let (_, body): (_, CreateMessageResponse) = send(&app, post(&payload)).await;
        created.push(body.message);
    }

    let (status, body): (_, ListMessagesResponse) = send(&app, get()).await;
    assert_eq!(status, StatusCode::OK);

    created.reverse();
    assert_eq!(body.messages, created);
}

#[tokio::test]
async fn created_message_round_trips_through_list() {
    let app = app();
    let (_, created): (_, CreateMessageResponse) =
        send(&app, post(r#"{"content":"  padded  "}"#)).await;

    let (_, listed): (_, ListMessagesResponse) = send(&app, get()).await;
    assert_eq!(listed.messages.len(), 1);
    assert_eq!(listed.messages[0], created.message);
    assert_eq!(listed.messages[0].content, "padded");
}

#[tokio::test]
async fn list_is_idempotent() {
    let app = app();
    let _: (_, CreateMessageResponse) = send(&app, post(r#"{"content":"a"}"#)).await;
    let _: (_, CreateMessageResponse) = send(&app, post(r#"{"content":"b"}"#)).await;

    let (_, first): (_, ListMessagesResponse) = send(&app, get()).await;
    let (_, second): (_, ListMessagesResponse) = send(&app, get()).await;
    assert_eq!(first.messages, second.messages);
}

#[tokio::test]
async fn store_failures_are_database_errors() {
    let app = app_with(Arc::new(BrokenStore));

    let (status, body): (_, ErrorResponse) = send(&app, post(r#"{"content":"hi"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.code, "DATABASE_ERROR");
    assert_eq!(body.error, "Failed to create message");

    let (status, body): (_, ErrorResponse) = send(&app, get()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.code, "DATABASE_ERROR");
    assert!(!body.error.contains("disk"));
}

#[tokio::test]
async fn validation_happens_before_storage() {
    // A broken store still yields 400 for bad content
    let app = app_with(Arc::new(BrokenStore));
    let (status, body): (_, ErrorResponse) = send(&app, post(r#"{"content":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn preflight_allows_configured_origin() {
    let app = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/messages")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ORIGIN
    );
}

#[tokio::test]
async fn other_origins_get_no_cors_header() {
    let app = app();
    let request = Request::builder()
        .uri("/api/messages")
        .header(header::ORIGIN, "https://elsewhere.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn health_is_up() {
    let app = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body): (_, serde_json::Value) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}
