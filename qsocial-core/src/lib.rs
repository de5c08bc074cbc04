//! qsocial-core: the shared vocabulary of qsocial
//!
//! Holds the single persisted entity ([`Message`]), the content rule every
//! message must pass ([`validate`]), the JSON shapes exchanged between the
//! client and the API, and the startup configuration ([`AppConfig`]).

pub mod config;
pub mod message;
pub mod validation;
pub mod wire;

pub use config::{AppConfig, ConfigError, Environment};
pub use message::{Message, MessageContent, MAX_CONTENT_CHARS};
pub use validation::{validate, validate_str, Validation, ValidationError};
pub use wire::{
    CreateMessageRequest, CreateMessageResponse, ErrorCode, ErrorResponse, ListMessagesResponse,
};
