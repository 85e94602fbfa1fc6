//! Structural validation results.

use serde::{Deserialize, Serialize};

/// Outcome of an entity's self-validation.
///
/// Validity is derived from the error list, so an empty list always means
/// valid and a non-empty one always means invalid. Messages keep the order
/// in which they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ValidationResultWire", from = "ValidationResultWire")]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// A result with no errors.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Record an error message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record `message` unless `condition` holds.
    pub fn ensure(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.push(message);
        }
    }

    /// Whether no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded messages in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consume the result, returning its messages.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl From<Vec<String>> for ValidationResult {
    fn from(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationResultWire {
    is_valid: bool,
    errors: Vec<String>,
}

impl From<ValidationResult> for ValidationResultWire {
    fn from(result: ValidationResult) -> Self {
        Self {
            is_valid: result.is_valid(),
            errors: result.errors,
        }
    }
}

impl From<ValidationResultWire> for ValidationResult {
    fn from(wire: ValidationResultWire) -> Self {
        Self {
            errors: wire.errors,
        }
    }
}
