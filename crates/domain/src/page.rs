//! Offset pagination.
//!
//! Paginated Admin API endpoints take `limit` and `offset` query
//! parameters and answer with a [`Page`]. The number of pages is only
//! known once the first page has arrived, so traversal is modelled as a
//! [`PageCursor`] that is advanced with each page's `totalCount`.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size the Admin API accepts.
pub const MAX_PAGE_SIZE: u32 = 50;

/// One page of a paginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub objects: Vec<T>,
    /// Size of the whole collection on the server.
    pub total_count: u64,
    /// Offset echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Limit echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// The `limit`/`offset` pair for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page size.
    pub limit: u32,
    /// Index of the first item to return.
    pub offset: u64,
}

impl PageRequest {
    /// Returns the query parameters for this page.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ]
    }
}

/// Position within a paginated traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    limit: u32,
    page_index: u64,
}

impl PageCursor {
    /// Creates a cursor on the first page.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageSize` if `limit` is zero or above
    /// [`MAX_PAGE_SIZE`].
    pub const fn first(limit: u32) -> DomainResult<Self> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(DomainError::InvalidPageSize(limit));
        }
        Ok(Self {
            limit,
            page_index: 0,
        })
    }

    /// Zero-based index of the current page.
    #[must_use]
    pub const fn page_index(&self) -> u64 {
        self.page_index
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Offset of the current page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page_index * self.limit as u64
    }

    /// The request for the current page.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        PageRequest {
            limit: self.limit,
            offset: self.offset(),
        }
    }

    /// Index of the last page for a collection of `total_count` items.
    ///
    /// An empty collection still has a page 0.
    #[must_use]
    pub const fn last_page_index(&self, total_count: u64) -> u64 {
        total_count.div_ceil(self.limit as u64).saturating_sub(1)
    }

    /// Number of requests needed to read `total_count` items.
    #[must_use]
    pub const fn pages_required(&self, total_count: u64) -> u64 {
        self.last_page_index(total_count) + 1
    }

    /// Moves to the next page, or returns `None` once the current page is
    /// the last one for `total_count` items.
    #[must_use]
    pub const fn advance(self, total_count: u64) -> Option<Self> {
        if self.page_index >= self.last_page_index(total_count) {
            return None;
        }
        Some(Self {
            limit: self.limit,
            page_index: self.page_index + 1,
        })
    }
}
