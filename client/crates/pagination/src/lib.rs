//! Offset pagination envelope primitives shared by catalog API clients.
//!
//! Purpose: give every list endpoint one request shape ([`PageRequest`]) and
//! one normalised metadata shape ([`PageInfo`]). Remote endpoints disagree on
//! which metadata fields they return; clients normalise whatever arrives into
//! a `PageInfo` with every field present (zero-valued when the server omitted
//! it) so downstream code never branches on missing metadata.

use serde::{Deserialize, Serialize};

/// Default page number requested when the caller does not specify one.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size requested when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Which page of a listing to request, one-based.
///
/// Zero values are normalised up to the documented defaults so a
/// `PageRequest` always describes a fetchable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// One-based page number.
    pub page: u32,
    /// Maximum number of items per page.
    pub limit: u32,
}

impl PageRequest {
    /// Build a request, normalising zero inputs to the defaults.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// The request for a different page with the same limit.
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self::new(page, self.limit)
    }

    /// Render the request as query-string pairs.
    #[must_use]
    pub fn to_query_pairs(self) -> Vec<(String, String)> {
        vec![
            ("page".to_owned(), self.page.to_string()),
            ("limit".to_owned(), self.limit.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Normalised pagination metadata attached to a page of results.
///
/// Every field is always present; endpoints that return no metadata yield the
/// all-zero form. Serialised field names follow the wire convention of the
/// catalog API (`totalPages`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
    /// One-based page number this metadata describes.
    #[serde(default)]
    pub page: u32,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: u32,
    /// Total number of pages at the applied limit.
    #[serde(default, rename = "totalPages")]
    pub total_pages: u32,
}

impl PageInfo {
    /// Whether the metadata is the zero-valued placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One page of items together with its normalised metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Normalised pagination metadata.
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Build a page from items and metadata.
    #[must_use]
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
