//! Offset/limit pagination helpers.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on page size; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl PageParams {
    /// Effective limit: defaulted and clamped to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Effective offset: negative values are treated as zero.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: None,
            offset: None,
        }
    }
}

/// A page of results with the total matching count.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, params: &PageParams) -> Self {
        Self {
            items,
            total,
            limit: params.limit(),
            offset: params.offset(),
        }
    }
}
