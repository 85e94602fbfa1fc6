//! Structured adapter results and their HTTP rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use entityhub_core::error::AppError;

use crate::error::ApiErrorResponse;

/// A domain rule that refused a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Component that enforced the rule.
    pub component: String,
    /// Operation that was refused.
    pub operation: String,
    /// Human-readable reason.
    pub message: String,
}

impl From<AppError> for RuleViolation {
    fn from(err: AppError) -> Self {
        let (component, operation) = match err.context {
            Some(ctx) => (ctx.component, ctx.operation),
            None => (String::new(), String::new()),
        };
        Self {
            component,
            operation,
            message: err.message,
        }
    }
}

/// What happened to a request, for every expected case.
///
/// Opaque faults travel separately as `Err(AppError)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<V> {
    /// Read or update succeeded.
    Ok(V),
    /// Create succeeded.
    Created(V),
    /// Delete succeeded.
    NoContent,
    /// No entity has the requested identifier.
    NotFound,
    /// Structural validation failed; messages in validation order.
    Invalid(Vec<String>),
    /// A domain rule refused the write.
    Rejected(RuleViolation),
}

impl<V> Outcome<V> {
    /// The carried view, if any.
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Ok(v) | Self::Created(v) => Some(v),
            _ => None,
        }
    }
}

impl<V: Serialize> IntoResponse for Outcome<V> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(v) => (StatusCode::OK, Json(v)).into_response(),
            Self::Created(v) => (StatusCode::CREATED, Json(v)).into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse::new("NOT_FOUND", "Resource not found")),
            )
                .into_response(),
            Self::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                Json(
                    ApiErrorResponse::new("VALIDATION_ERROR", "Validation failed")
                        .with_details(serde_json::json!(errors)),
                ),
            )
                .into_response(),
            Self::Rejected(violation) => (
                StatusCode::CONFLICT,
                Json(ApiErrorResponse::new("DOMAIN_RULE_VIOLATION", violation.message)),
            )
                .into_response(),
        }
    }
}
