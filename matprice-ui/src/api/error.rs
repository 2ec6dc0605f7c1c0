//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Errors surfaced to the browser as `{"error": message}`
#[derive(Debug)]
pub enum ApiError {
    /// Record store read/write failure
    Store(matprice_common::Error),
    /// Blocking store task panicked or was cancelled
    Task(String),
}

impl From<matprice_common::Error> for ApiError {
    fn from(e: matprice_common::Error) -> Self {
        ApiError::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Store(e) => {
                error!("Record store error: {}", e);
                e.to_string()
            }
            ApiError::Task(msg) => {
                error!("Store task failed: {}", msg);
                msg
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
