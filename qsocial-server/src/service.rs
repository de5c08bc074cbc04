//! Create/List handlers, independent of the hosting transport
//!
//! Both the axum server and the function gateway call into [`MessageService`];
//! they only differ in how bytes arrive and how responses leave.

use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;
use qsocial_core::{validate, ErrorCode, ErrorResponse, Message, MessageContent, ValidationError};
use serde::Serialize;
use serde_json::Value;

use crate::store::{MessageStore, StoreError};

/// Source of `createdAt` timestamps
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Which store operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Insert,
    List,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("insert"),
            Self::List => f.write_str("list"),
        }
    }
}

/// Everything a Create or List call can fail with
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request body is required")]
    MissingBody,

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("store {op} failed: {source}")]
    Store {
        op: StoreOp,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) | Self::MissingBody => ErrorCode::Validation,
            Self::MalformedBody(_) => ErrorCode::Internal,
            Self::Store { .. } => ErrorCode::Database,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code() {
            ErrorCode::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show the caller. Server faults never carry detail.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::MissingBody => "Request body is required".to_string(),
            Self::MalformedBody(_) => "Internal server error".to_string(),
            Self::Store {
                op: StoreOp::Insert,
                ..
            } => "Failed to create message".to_string(),
            Self::Store {
                op: StoreOp::List, ..
            } => "Failed to retrieve messages".to_string(),
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.public_message())
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    /// Which [`MessageStore`] backs this instance
    pub store: &'static str,
}

/// Message API operations over an injected store and clock
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn MessageStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    /// Liveness report served on `/health` by both adapters.
    pub fn health(&self) -> Health {
        Health {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            store: self.store.kind(),
        }
    }

    /// Create from a raw request body (`{"content": "..."}`).
    pub async fn create(&self, body: &[u8]) -> Result<Message, ServiceError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ServiceError::MissingBody);
        }

        let parsed: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::error!(error = %e, "failed to parse create request body");
            ServiceError::MalformedBody(e.to_string())
        })?;

        let content = parsed.get("content").unwrap_or(&Value::Null);
        self.create_content(content).await
    }

    /// Validate, stamp and persist. Validation failures never touch the store.
    pub async fn create_content(&self, content: &Value) -> Result<Message, ServiceError> {
        validate(content).into_result()?;

        // validate() accepted it, so it is a string
        let raw = content.as_str().unwrap_or_default();
        let message = Message::new(MessageContent::new(raw)?, self.clock.now_millis());

        self.store.insert(&message).await.map_err(|source| {
            tracing::error!(error = %source, id = %message.id, "database insert error");
            ServiceError::Store {
                op: StoreOp::Insert,
                source,
            }
        })?;

        tracing::debug!(id = %message.id, created_at = message.created_at, "message created");
        Ok(message)
    }

    /// All messages, newest first.
    pub async fn list(&self) -> Result<Vec<Message>, ServiceError> {
        self.store.list_all().await.map_err(|source| {
            tracing::error!(error = %source, "database query error");
            ServiceError::Store {
                op: StoreOp::List,
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct FixedClock(AtomicI64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn service() -> MessageService {
        MessageService::with_clock(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedClock(AtomicI64::new(1_000))),
        )
    }

    #[test]
    fn health_names_the_store() {
        let health = service().health();
        assert_eq!(health.status, "ok");
        assert_eq!(health.store, "memory");
    }

    #[tokio::test]
    async fn create_trims_and_stamps() {
        let svc = service();
        let message = svc.create(br#"{"content": "  hello  "}"#).await.unwrap();
        assert_eq!(message.content, "hello");
        assert_eq!(message.created_at, 1_000);
    }

    #[tokio::test]
    async fn blank_body_is_validation_error() {
        let err = service().create(b"  ").await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingBody));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Request body is required");
    }

    #[tokio::test]
    async fn missing_content_field_is_not_a_string() {
        let err = service().create(br#"{"text": "hi"}"#).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(err.public_message(), "Message content must be a string");
    }

    #[tokio::test]
    async fn malformed_json_is_internal() {
        let err = service().create(b"{not json").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[tokio::test]
    async fn rejected_content_is_not_stored() {
        let svc = service();
        assert!(svc.create(br#"{"content": "   "}"#).await.is_err());
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[test]
    fn store_errors_hide_detail() {
        let err = ServiceError::Store {
            op: StoreOp::List,
            source: StoreError::Corrupt {
                id: "x".into(),
                reason: "secret detail".into(),
            },
        };
        let body = err.to_body();
        assert_eq!(body.code, "DATABASE_ERROR");
        assert_eq!(body.error, "Failed to retrieve messages");
        assert!(!body.error.contains("secret"));
    }
}
