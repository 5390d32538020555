//! Shared query parameter types for API handlers.

use serde::Deserialize;
use track1_core::pagination::Page;
use track1_core::tags::split_tags;

/// Page-based pagination parameters (`?page=&limit=`).
///
/// Missing or out-of-range values are clamped by [`Page::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn to_page(&self) -> Page {
        Page::new(self.page, self.limit)
    }
}

/// Query parameters for the category filter (`?categ=pop,rnb&page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    /// Comma-separated categories; any overlap matches.
    #[serde(default)]
    pub categ: String,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl FilterParams {
    pub fn categories(&self) -> Vec<String> {
        split_tags(&self.categ)
    }

    pub fn to_page(&self) -> Page {
        Page::new(self.page, self.limit)
    }
}
