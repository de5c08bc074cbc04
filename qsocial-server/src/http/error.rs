//! Service errors as HTTP responses
//!
//! Body is always `{"error": ..., "code": ...}`. Detail for server faults was
//! already logged by the service; only the generic text goes out.

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::service::ServiceError;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_body())).into_response()
    }
}
