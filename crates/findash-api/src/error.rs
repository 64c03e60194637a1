//! Error types for findash-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use findash_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Backend request failed: {0}")]
    Backend(#[from] ClientError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            // Pass through a backend 404 (stale id); everything else is a gateway failure
            ApiError::Backend(ClientError::BackendStatus { status: 404, .. }) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}
