//! Pagination arithmetic and the canonical `{data, pagination}` envelope.
//!
//! Defaults live here and nowhere else: every list operation, and the HTTP
//! query-string deserialization, draw `limit = 10` / `offset = 0` from
//! `PageParams`.  Derived fields (`total_pages`, `current_page`) are pure
//! functions of the stored ones and are never stored independently.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

/// Window requested by the caller.  Values are assumed non-negative;
/// rejecting malformed input is upstream validation's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_offset")]
    pub offset: i64,
}

pub(crate) fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

pub(crate) fn default_offset() -> i64 {
    DEFAULT_OFFSET
}

impl Default for PageParams {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, offset: DEFAULT_OFFSET }
    }
}

/// Pagination metadata derived from a total count and the request window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// `total_pages = ceil(total/limit)` and `current_page = floor(offset/limit) + 1`
/// when `limit > 0`; a zero limit pins them to `0` and `1` respectively.
pub fn paginate(total: i64, params: PageParams) -> Pagination {
    let PageParams { limit, offset } = params;
    let (total_pages, current_page) = if limit > 0 {
        ((total + limit - 1) / limit, offset / limit + 1)
    } else {
        (0, 1)
    };
    Pagination { total, limit, offset, total_pages, current_page }
}

/// The envelope every list operation returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, params: PageParams) -> Self {
        Self { data, pagination: paginate(total, params) }
    }

    /// Canonical empty-list response: `data = []`, `total = 0`,
    /// `total_pages = 0`, `current_page = 1`.  Not an error.
    pub fn empty(params: PageParams) -> Self {
        Self::new(Vec::new(), 0, params)
    }
}
