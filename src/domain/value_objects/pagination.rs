//! Pagination query parameters and the paginated response envelope.
//!
//! Every table endpoint of the backend speaks the same convention:
//!
//! ```text
//! GET /api/admin/<table>?page=2&page_size=20&status=active&search=foo
//!
//! { "items": [...], "pagination": { "page": 2, "page_size": 20, "total": 57 } }
//! ```

use serde::{Deserialize, Serialize};

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the console will request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for a paginated table request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-based page number
    pub page: u32,

    pub page_size: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            status: None,
            search: None,
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            ..Self::default()
        }
    }

    /// Set the status filter. Empty strings clear it.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = normalize_filter(status.into());
        self
    }

    /// Set the search term. Surrounding whitespace is trimmed, empty clears it.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = normalize_filter(search.into());
        self
    }

    /// Query pairs in the order the backend documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("page_size", self.page_size.clamp(1, MAX_PAGE_SIZE).to_string()),
        ];
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

fn normalize_filter(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Pagination metadata returned alongside every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl PaginationMeta {
    /// Number of pages; zero when the table is empty.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Paginated response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn empty(query: &PageQuery) -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationMeta {
                page: query.page,
                page_size: query.page_size,
                total: 0,
            },
        }
    }

    pub fn total(&self) -> u64 {
        self.pagination.total
    }
}
