//! Page/limit pagination helpers.
//!
//! Listing endpoints take a 1-based `page` and a `limit`; the database
//! layer wants `LIMIT`/`OFFSET`. Clamping happens here so repositories can
//! trust their inputs.

/// Page used when the client omits `?page=`.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client omits `?limit=`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a client may request.
pub const MAX_LIMIT: i64 = 100;

/// A clamped page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Build a page from optional user input, clamping `page >= 1` and
    /// `1 <= limit <= MAX_LIMIT`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
        }
    }

    /// Row offset of the first item on this page: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Clamp a user-provided limit to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided page number to `>= 1`.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}
