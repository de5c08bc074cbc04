//! `GET /health`: liveness plus the store backing this instance

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::server::AppState;
use crate::service::Health;

async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(state.service.health())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
