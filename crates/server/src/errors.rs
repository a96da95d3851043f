use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;

/// JSON error response: `{"error": "...", "detail": "..."}`.
#[derive(Debug, Error)]
#[error("{status}: {error}")]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, detail: Option<String>) -> Self {
        Self { status, error: error.to_string(), detail }
    }

    /// Map a service failure. Every variant is a server-side fault; the title
    /// tells a corrupt stored list apart from storage failures.
    pub fn from_service(title: &str, e: &ServiceError) -> Self {
        let title = if e.is_serialization() { "Corrupt Record" } else { title };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, title, Some(e.to_string()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.error, detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}
