//! # Pagination
//!
//! Resolves `per_page` / `page` query parameters into a concrete window.
//!
//! ```text
//!   per_page=15, page=2
//!
//!   ┌────────┬────────┬────────┬────────┐
//!   │ 1..15  │ 16..30 │ 31..45 │  ...   │
//!   └────────┴────────┴────────┴────────┘
//!              ▲
//!              offset = 15 * (2 - 1) = 15, limit = 15
//! ```
//!
//! Any value that is absent, blank, not a whole number, or below 1 falls
//! back to the default. Oversized pages are clamped to [`MAX_PAGE_SIZE`].

use serde::Deserialize;

use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Raw pagination parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    pub per_page: Option<String>,
    pub page: Option<String>,
}

impl PageParams {
    /// Resolves the raw values into a [`Page`].
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::pagination::PageParams;
    ///
    /// let page = PageParams { per_page: Some("15".into()), page: Some("2".into()) }.resolve();
    /// assert_eq!((page.offset(), page.limit()), (15, 15));
    ///
    /// let page = PageParams { per_page: Some("".into()), page: None }.resolve();
    /// assert_eq!((page.offset(), page.limit()), (0, 20));
    /// ```
    pub fn resolve(&self) -> Page {
        let size = positive(&self.per_page)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let number = positive(&self.page).unwrap_or(1);
        Page { size, number }
    }
}

/// Parses a strictly positive whole number, or nothing.
fn positive(raw: &Option<String>) -> Option<u32> {
    raw.as_deref()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}

/// A resolved page window. Both fields are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub size: u32,
    pub number: u32,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            size: DEFAULT_PAGE_SIZE,
            number: 1,
        }
    }
}

impl Page {
    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        i64::from(self.size) * (i64::from(self.number) - 1)
    }

    /// Rows to return.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// Returns the window of an already ordered slice.
///
/// A page past the end yields an empty slice.
pub fn paginate<T>(rows: &[T], page: Page) -> &[T] {
    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX).min(rows.len());
    let end = start.saturating_add(page.size as usize).min(rows.len());
    &rows[start..end]
}

// =============================================================================
// Unit Tests
// =============================================================================
