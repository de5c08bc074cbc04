//! JSON bodies exchanged between client and API

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// POST /api/messages body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub content: String,
}

/// POST /api/messages success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageResponse {
    pub message: Message,
}

/// GET /api/messages success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<Message>,
}

/// Machine-readable failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Content rejected before persistence (4xx)
    Validation,
    /// Storage fault (5xx)
    Database,
    /// Anything else that went wrong server-side (5xx)
    Internal,
    /// Client side only: request never reached or returned from the server
    Network,
    /// Gateway adapter: unknown route
    NotFound,
    /// Gateway adapter: route exists, method doesn't
    MethodNotAllowed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Database => "DATABASE_ERROR",
            Self::Internal => "INTERNAL_ERROR",
            Self::Network => "NETWORK_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VALIDATION_ERROR" => Ok(Self::Validation),
            "DATABASE_ERROR" => Ok(Self::Database),
            "INTERNAL_ERROR" => Ok(Self::Internal),
            "NETWORK_ERROR" => Ok(Self::Network),
            "NOT_FOUND" => Ok(Self::NotFound),
            "METHOD_NOT_ALLOWED" => Ok(Self::MethodNotAllowed),
            _ => Err(()),
        }
    }
}

/// Error body for every non-2xx response
///
/// `code` stays a plain string so clients can carry kinds they don't know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.as_str().to_string(),
        }
    }

    /// Parsed failure kind, `None` when the server sent something unrecognized.
    pub fn kind(&self) -> Option<ErrorCode> {
        self.code.parse().ok()
    }
}
