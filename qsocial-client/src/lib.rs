//! qsocial-client: everything on the caller's side of the API
//!
//! - [`ApiClient`]: HTTP calls, failures folded into [`ApiError`]
//! - [`Feed`]: feed/draft/error/loading state with the submit guards
//! - [`user_message`]: failure kind to the sentence a person sees
//! - [`app`] and [`ui`]: the terminal front end

pub mod api;
pub mod app;
pub mod errors;
pub mod feed;
pub mod ui;

pub use api::{ApiClient, ApiError, MessageApi};
pub use errors::user_message;
pub use feed::{Feed, SubmitOutcome};
