//! Page windows over already-fetched row sets

use serde::Deserialize;

/// Query parameters for the paginated invoices listing
///
/// `page` starts at 1; `query` defaults to an empty (match-all) search.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: usize,
    pub query: String,
}

fn default_page() -> usize {
    1
}

impl ListParams {
    /// Page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }
}

/// Reduce `rows` to the window for `page` (1-based) with `size` items per
/// page: offset = (page - 1) * size
pub fn page_window<T>(rows: Vec<T>, page: usize, size: usize) -> Vec<T> {
    let page = page.max(1);
    let size = size.max(1);
    // Saturate: the page number comes straight from the query string, and
    // an out-of-range page is just an empty window, not a panic.
    let offset = (page - 1).saturating_mul(size);
    rows.into_iter().skip(offset).take(size).collect()
}

/// Total number of pages needed for `total` rows: ceil(total / size)
pub fn total_pages(total: usize, size: usize) -> usize {
    total.div_ceil(size.max(1))
}
