//! Unified application error types for EntityHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Structural validation failures are
//! *not* errors: they travel as [`ValidationResult`] values and are
//! resolved at the presentation adapter.
//!
//! [`ValidationResult`]: crate::types::ValidationResult

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input could not be accepted (malformed identifier, bad payload).
    Validation,
    /// A service-level invariant was breached (duplicate natural key, etc.).
    DomainRule,
    /// An internal server error occurred.
    Internal,
    /// A persistence error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::DomainRule => write!(f, "DOMAIN_RULE"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// Where an error was raised: the component and the operation it was
/// performing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorContext {
    /// Component that raised the error (e.g. `"UserService"`).
    pub component: String,
    /// Operation being performed (e.g. `"add"`).
    pub operation: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.component, self.operation)
    }
}

/// The unified application error used throughout EntityHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Component/operation that raised the error, when known.
    pub context: Option<ErrorContext>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach the component and operation that raised this error.
    pub fn in_context(mut self, component: impl Into<String>, operation: impl Into<String>) -> Self {
        self.context = Some(ErrorContext {
            component: component.into(),
            operation: operation.into(),
        });
        self
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a domain-rule violation raised by `component` while running
    /// `operation`.
    pub fn domain_rule(
        component: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::DomainRule, message).in_context(component, operation)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether this error is a domain-rule violation.
    pub fn is_domain_rule(&self) -> bool {
        self.kind == ErrorKind::DomainRule
    }

    /// Whether this error reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            context: self.context.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_rule_carries_context() {
        let err = AppError::domain_rule("UserService", "add", "Login 'alice' is already taken");
        assert!(err.is_domain_rule());
        let ctx = err.context.as_ref().expect("context");
        assert_eq!(ctx.component, "UserService");
        assert_eq!(ctx.operation, "add");
        assert_eq!(ctx.to_string(), "UserService::add");
        assert_eq!(err.to_string(), "DOMAIN_RULE: Login 'alice' is already taken");
    }

    #[test]
    fn test_clone_drops_source_keeps_context() {
        let io = std::io::Error::other("disk gone");
        let err = AppError::from(io).in_context("MemoryRepository", "add");
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.context, err.context);
        assert_eq!(cloned.kind, ErrorKind::Internal);
    }
}
