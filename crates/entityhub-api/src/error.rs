//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use entityhub_core::error::{AppError, ErrorKind};

/// Result type returned by handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// A body without details.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attach details.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::new(ErrorKind::Serialization, rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Serialization => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::DomainRule => (StatusCode::CONFLICT, "DOMAIN_RULE_VIOLATION"),
            ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(
                    error = %err,
                    context = ?err.context,
                    source = ?err.source,
                    "Internal server error"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        // Faults are logged in full; clients only get a generic message.
        let message = if status.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            err.message
        };

        (status, Json(ApiErrorResponse::new(error_code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_kind_to_status() {
        assert_eq!(status_of(AppError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::domain_rule("S", "add", "x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::database("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(AppError::validation("x")), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_serialization_error_is_bad_request() {
        let err = AppError::new(ErrorKind::Serialization, "unknown variant `superuser`");
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
