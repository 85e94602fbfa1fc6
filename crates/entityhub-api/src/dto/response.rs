//! Response DTOs shared by every collection.

use serde::{Deserialize, Serialize};

/// One page of a search: the list views plus the unpaged match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage<V> {
    /// Matching list views on the requested page.
    #[serde(rename = "Result")]
    pub result: Vec<V>,
    /// Number of matches across all pages.
    #[serde(rename = "Count")]
    pub count: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Backing store in use.
    pub backend: String,
}
