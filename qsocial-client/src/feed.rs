//! Client-side feed state
//!
//! Holds what a screen needs: the feed as the server ordered it, the draft,
//! at most one error sentence, and whether a post is in flight. Nothing here
//! is persisted.

use qsocial_core::{Message, MAX_CONTENT_CHARS};

use crate::api::{ApiError, MessageApi};
use crate::errors::user_message;

/// What a submit attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Guard refused: blank draft, or a post already in flight
    Skipped,
    Posted(Message),
    Failed(ApiError),
}

/// Feed, draft, error slot and loading flag over a [`MessageApi`]
pub struct Feed<A> {
    api: A,
    messages: Vec<Message>,
    draft: String,
    error: Option<String>,
    loading: bool,
}

impl<A: MessageApi> Feed<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            messages: Vec::new(),
            draft: String::new(),
            error: None,
            loading: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// `280 - draft length`; negative once the draft is over the limit.
    pub fn remaining(&self) -> i64 {
        MAX_CONTENT_CHARS as i64 - self.draft.chars().count() as i64
    }

    pub fn is_over_limit(&self) -> bool {
        self.remaining() < 0
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.draft.trim().is_empty()
    }

    /// Fetch the whole feed. Success replaces it and clears the error slot.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        match self.api.list_messages().await {
            Ok(messages) => {
                self.messages = messages;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(code = %e.code, "feed load failed");
                self.error = Some(user_message(&e));
                Err(e)
            }
        }
    }

    /// Post the current draft.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(draft) = self.begin_submit() else {
            return SubmitOutcome::Skipped;
        };
        let result = self.api.create_message(&draft).await;
        self.finish_submit(result)
    }

    /// First half of [`submit`](Self::submit): apply the guards, clear the
    /// error, raise the loading flag and hand back the text to send.
    ///
    /// Split out so a UI can redraw between the two halves.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.error = None;
        self.loading = true;
        Some(self.draft.clone())
    }

    /// Second half of [`submit`](Self::submit).
    ///
    /// Success prepends the message and clears the draft; failure keeps the
    /// draft so it can be retried.
    pub fn finish_submit(&mut self, result: Result<Message, ApiError>) -> SubmitOutcome {
        self.loading = false;
        match result {
            Ok(message) => {
                self.messages.insert(0, message.clone());
                self.draft.clear();
                SubmitOutcome::Posted(message)
            }
            Err(e) => {
                self.error = Some(user_message(&e));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
