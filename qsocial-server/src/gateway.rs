//! Function-as-a-service adapter
//!
//! Speaks the API-gateway proxy event format: one JSON request event in, one
//! JSON response out. Same [`MessageService`] as the HTTP server; this layer
//! only does routing, CORS headers and body encoding.

use std::collections::{BTreeMap, HashMap};

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use qsocial_core::{CreateMessageResponse, ErrorCode, ErrorResponse, ListMessagesResponse};
use serde::{Deserialize, Serialize};

use crate::service::{MessageService, ServiceError};

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// Incoming proxy event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl GatewayRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }
}

/// Outgoing proxy response
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Routes proxy events to the message service
pub struct Gateway {
    service: MessageService,
    cors_origins: Vec<String>,
}

impl Gateway {
    pub fn new(service: MessageService, cors_origins: Vec<String>) -> Self {
        Self {
            service,
            cors_origins,
        }
    }

    /// Handle one event. Never fails: every outcome becomes a response.
    pub async fn handle_event(&self, request: GatewayRequest) -> GatewayResponse {
        let origin = self.allowed_origin(request.header("origin"));
        let path = request.path.trim_end_matches('/');
        let method = request.http_method.to_ascii_uppercase();

        tracing::debug!(method = %method, path = %request.path, "gateway event");

        let (status, body) = match (path, method.as_str()) {
            (_, "OPTIONS") if path == "/api/messages" || path == "/health" => {
                (StatusCode::NO_CONTENT, String::new())
            }
            ("/api/messages", "GET") => self.list().await,
            ("/api/messages", "POST") => self.create(&request).await,
            ("/api/messages", _) => error_body(
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorCode::MethodNotAllowed,
                format!("Method {} not allowed", method),
            ),
            ("/health", "GET") => json_body(StatusCode::OK, &self.service.health()),
            _ => error_body(
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                format!("No route for {} {}", method, request.path),
            ),
        };

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Methods".to_string(), ALLOW_METHODS.to_string());
        headers.insert("Access-Control-Allow-Headers".to_string(), ALLOW_HEADERS.to_string());
        if let Some(origin) = origin {
            headers.insert("Access-Control-Allow-Origin".to_string(), origin);
            headers.insert("Vary".to_string(), "Origin".to_string());
        }

        GatewayResponse {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    async fn list(&self) -> (StatusCode, String) {
        match self.service.list().await {
            Ok(messages) => json_body(StatusCode::OK, &ListMessagesResponse { messages }),
            Err(e) => service_error_body(&e),
        }
    }

    async fn create(&self, request: &GatewayRequest) -> (StatusCode, String) {
        let raw = match decode_body(request) {
            Ok(raw) => raw,
            Err(e) => return service_error_body(&e),
        };

        match self.service.create(&raw).await {
            Ok(message) => json_body(StatusCode::CREATED, &CreateMessageResponse { message }),
            Err(e) => service_error_body(&e),
        }
    }

    /// Echo the caller's origin when allowed, otherwise the first configured one.
    fn allowed_origin(&self, requested: Option<&str>) -> Option<String> {
        if let Some(requested) = requested {
            if self.cors_origins.iter().any(|o| o == requested) {
                return Some(requested.to_string());
            }
        }
        if self.cors_origins.iter().any(|o| o == "*") {
            return Some("*".to_string());
        }
        self.cors_origins.first().cloned()
    }
}

fn decode_body(request: &GatewayRequest) -> Result<Vec<u8>, ServiceError> {
    let body = request.body.as_deref().unwrap_or_default();
    if request.is_base64_encoded {
        BASE64.decode(body).map_err(|e| {
            tracing::error!(error = %e, "failed to decode base64 body");
            ServiceError::MalformedBody(e.to_string())
        })
    } else {
        Ok(body.as_bytes().to_vec())
    }
}

fn json_body<T: Serialize>(status: StatusCode, value: &T) -> (StatusCode, String) {
    match serde_json::to_string(value) {
        Ok(body) => (status, body),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::Internal,
                "Internal server error",
            )
        }
    }
}

fn service_error_body(err: &ServiceError) -> (StatusCode, String) {
    error_body(err.status(), err.code(), err.public_message())
}

fn error_body(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> (StatusCode, String) {
    // ErrorResponse is two strings; serialization cannot fail
    let body = serde_json::to_string(&ErrorResponse::new(code, message)).unwrap_or_default();
    (status, body)
}
