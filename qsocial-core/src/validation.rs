//! Message content validation
//!
//! The rule is the same for every entry point: the value must be a string,
//! and once leading/trailing whitespace is trimmed it must hold between 1 and
//! [`MAX_CONTENT_CHARS`] characters. Callers store the trimmed form.

use serde_json::Value;

use crate::message::MAX_CONTENT_CHARS;

/// Why a piece of content was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Message content {}", self.reason())]
pub enum ValidationError {
    /// Input was not textual (number, null, object, missing field...)
    NotString,

    /// Nothing left after trimming
    Empty,

    /// Trimmed content exceeds the character limit
    TooLong { max: usize },
}

impl ValidationError {
    /// Short reason without the field prefix.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotString => "must be a string",
            Self::Empty => "cannot be empty",
            Self::TooLong { .. } => "must be 280 characters or less",
        }
    }
}

/// Outcome of [`validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(ValidationError),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The short failure reason, if any.
    pub fn error(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e.reason()),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(e) => Err(e),
        }
    }
}

/// Validate an arbitrary JSON value as message content.
///
/// # Example
/// ```
/// use qsocial_core::{validate, Validation, ValidationError};
/// use serde_json::json;
///
/// assert_eq!(validate(&json!("hello")), Validation::Valid);
/// assert_eq!(validate(&json!(42)), Validation::Invalid(ValidationError::NotString));
/// assert_eq!(validate(&json!("   ")).error(), Some("cannot be empty"));
/// ```
pub fn validate(content: &Value) -> Validation {
    match content {
        Value::String(s) => validate_str(s),
        _ => Validation::Invalid(ValidationError::NotString),
    }
}

/// Validate content that is already known to be textual.
pub fn validate_str(content: &str) -> Validation {
    let len = content.trim().chars().count();

    if len == 0 {
        return Validation::Invalid(ValidationError::Empty);
    }

    if len > MAX_CONTENT_CHARS {
        return Validation::Invalid(ValidationError::TooLong {
            max: MAX_CONTENT_CHARS,
        });
    }

    Validation::Valid
}
