//! Query filter configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Page size used when a request does not specify `limit`.
pub const DEFAULT_LIMIT: u64 = 20;
/// Largest page size a request may ask for.
pub const MAX_LIMIT: u64 = 100;

/// Defaults applied when turning request parameters into a query filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size when `limit` is omitted or unparsable.
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    /// Upper bound for `limit`; larger values are clamped.
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

impl QueryConfig {
    /// Reject configurations that would produce empty pages.
    pub fn check(&self) -> Result<(), AppError> {
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(AppError::configuration(
                "query.default_limit and query.max_limit must be greater than zero",
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(AppError::configuration(format!(
                "query.default_limit ({}) exceeds query.max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

fn default_max_limit() -> u64 {
    MAX_LIMIT
}
