//! HTTP client for the message API

use async_trait::async_trait;
use qsocial_core::{
    CreateMessageRequest, CreateMessageResponse, ErrorCode, ErrorResponse, ListMessagesResponse,
    Message,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// A failed API call
///
/// `status` is 0 when no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({code})")]
pub struct ApiError {
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Request never reached the server, or the reply was unreadable.
    pub fn network() -> Self {
        Self {
            status: 0,
            code: ErrorCode::Network.as_str().to_string(),
            message: "Network request failed".to_string(),
        }
    }

    pub fn from_response(status: u16, body: ErrorResponse) -> Self {
        Self {
            status,
            code: body.code,
            message: body.error,
        }
    }

    /// Parsed kind; `None` for codes this client doesn't know.
    pub fn kind(&self) -> Option<ErrorCode> {
        self.code.parse().ok()
    }
}

/// The two API operations the client needs
#[async_trait]
pub trait MessageApi: Send + Sync {
    async fn list_messages(&self) -> Result<Vec<Message>, ApiError>;

    async fn create_message(&self, content: &str) -> Result<Message, ApiError>;
}

/// reqwest-backed [`MessageApi`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Client for `base_url` (e.g. `http://localhost:3001`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "request failed before a response arrived");
            ApiError::network()
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::debug!(error = %e, "failed to read response body");
            ApiError::network()
        })?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|e| {
                tracing::debug!(error = %e, "unreadable success body");
                ApiError::network()
            });
        }

        match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(body) => Err(ApiError::from_response(status.as_u16(), body)),
            Err(e) => {
                tracing::debug!(error = %e, status = status.as_u16(), "unreadable error body");
                Err(ApiError::network())
            }
        }
    }
}

#[async_trait]
impl MessageApi for ApiClient {
    async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        let body: ListMessagesResponse = self.send(self.http.get(self.url("/api/messages"))).await?;
        Ok(body.messages)
    }

    async fn create_message(&self, content: &str) -> Result<Message, ApiError> {
        let request = self
            .http
            .post(self.url("/api/messages"))
            .json(&CreateMessageRequest {
                content: content.to_string(),
            });
        let body: CreateMessageResponse = self.send(request).await?;
        Ok(body.message)
    }
}
