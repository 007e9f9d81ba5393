use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use profileera_common::error::ProfileEraError;

/// Message sent to the caller when the failure is not theirs to see.
const DEFAULT_SERVER_MESSAGE: &str = "Server error";

pub struct ApiError {
    error: ProfileEraError,
    server_message: &'static str,
}

impl ApiError {
    /// Replace the generic 500 message for this failure. Client errors keep
    /// their own message.
    pub fn or_server_message(mut self, message: &'static str) -> Self {
        self.server_message = message;
        self
    }
}

impl From<ProfileEraError> for ApiError {
    fn from(error: ProfileEraError) -> Self {
        Self {
            error,
            server_message: DEFAULT_SERVER_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.error {
            ProfileEraError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg }))
            }
            ProfileEraError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            ProfileEraError::InvalidLead(fields) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": "Validation failed", "fields": fields }),
            ),
            ProfileEraError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, serde_json::json!({ "error": msg }))
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": self.server_message }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
