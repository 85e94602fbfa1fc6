//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// A clamped page window: `page >= 1`, `page_size >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, lifting zero values to 1.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// One page of matching entities plus the size of the whole match set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// The items on this page, ordered by identifier.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Effective page number (1-based).
    pub page: u64,
    /// Effective page size.
    pub limit: u64,
}

impl<T> PagedResult<T> {
    /// Create a new page.
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.page_size,
        }
    }

    /// Create an empty page.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }
}
