//! Failure kinds to user-facing sentences

use qsocial_core::ErrorCode;

use crate::api::ApiError;

pub const NETWORK_MESSAGE: &str = "Unable to connect. Please check your internet connection.";
pub const SERVER_MESSAGE: &str = "Something went wrong. Please try again later.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Sentence to show for a failed call.
///
/// Only validation messages are passed through verbatim; they were written for people.
pub fn user_message(err: &ApiError) -> String {
    match err.kind() {
        Some(ErrorCode::Validation) => err.message.clone(),
        Some(ErrorCode::Network) => NETWORK_MESSAGE.to_string(),
        Some(ErrorCode::Database) | Some(ErrorCode::Internal) => SERVER_MESSAGE.to_string(),
        _ => UNEXPECTED_MESSAGE.to_string(),
    }
}
