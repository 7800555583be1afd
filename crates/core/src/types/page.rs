//! Server-side pagination types.
//!
//! The backend returns Spring Data style `Page<T>` objects for list
//! endpoints, and wraps some responses (orders) in an `ApiResponse<T>`
//! envelope. Pages are produced by the backend per request and are never
//! mutated locally - a fresh fetch replaces the prior page wholesale.

use serde::{Deserialize, Serialize};

/// One slice of a larger server-side paginated result set.
///
/// Invariants (backend-produced, verified in tests, trusted at runtime):
/// - `content.len() <= size`
/// - `number` is in `[0, total_pages)` whenever `total_elements > 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Total number of pages for this query.
    pub total_pages: u32,
    /// Total number of elements across all pages.
    pub total_elements: u64,
    /// Current page index, 0-based.
    pub number: u32,
    /// Requested page size (`content.len()` may be smaller on the last page).
    pub size: u32,
}

impl<T> Page<T> {
    /// An empty page with the given size. Used for lenient degradation
    /// when a backend response shape is unrecognized.
    #[must_use]
    pub const fn empty(size: u32) -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            number: 0,
            size,
        }
    }

    /// Wrap a bare array response as a single full page.
    #[must_use]
    pub fn from_full(content: Vec<T>) -> Self {
        let len = content.len();
        Self {
            total_pages: u32::from(len > 0),
            total_elements: len as u64,
            size: u32::try_from(len).unwrap_or(u32::MAX),
            number: 0,
            content,
        }
    }

    /// True when there are no elements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_elements == 0
    }

    /// Map page content to another type, keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            number: self.number,
            size: self.size,
        }
    }
}

/// API response wrapper used by the orders and dashboard stats
/// endpoints.
///
/// `{success, message, data, errors, timestamp}` - `data` is only
/// meaningful when `success` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, surfacing the backend's message on failure.
    ///
    /// # Errors
    ///
    /// Returns the `message` field when `success` is false or `data` is
    /// missing.
    pub fn into_data(self) -> Result<T, String> {
        if !self.success {
            return Err(self.message);
        }
        self.data.ok_or(self.message)
    }
}
