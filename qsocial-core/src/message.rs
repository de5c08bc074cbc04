//! The message entity and its validated content

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{validate_str, ValidationError};

/// Maximum number of characters in trimmed message content
pub const MAX_CONTENT_CHARS: usize = 280;

/// Validated, trimmed message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Validate and trim raw input.
    ///
    /// # Example
    /// ```
    /// use qsocial_core::MessageContent;
    ///
    /// let content = MessageContent::new("  hello  ").unwrap();
    /// assert_eq!(content.as_str(), "hello");
    /// assert!(MessageContent::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        validate_str(s).into_result()?;
        Ok(Self(s.trim().to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for MessageContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A posted message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Message {
    /// Build a new message with a fresh v4 identifier.
    pub fn new(content: MessageContent, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into_string(),
            created_at,
        }
    }

    /// Creation time as a UTC timestamp, if it is within chrono's range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }
}
