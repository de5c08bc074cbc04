//! Message endpoints
//!
//! The body is taken as raw bytes so that empty and malformed bodies map to
//! our own error codes instead of axum's JSON rejection.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use qsocial_core::{CreateMessageResponse, ListMessagesResponse};

use crate::http::server::AppState;
use crate::service::ServiceError;

/// GET /api/messages - every message, newest first
async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListMessagesResponse>, ServiceError> {
    let messages = state.service.list().await?;
    Ok(Json(ListMessagesResponse { messages }))
}

/// POST /api/messages - validate and store a message
async fn create_message(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateMessageResponse>), ServiceError> {
    let message = state.service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(CreateMessageResponse { message })))
}

/// Message routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/messages", get(list_messages).post(create_message))
}
