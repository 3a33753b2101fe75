//! Splitting a logical request into bounded pages the service will accept.

/// Maximum number of rows the service returns for a single statement.
///
/// Also the default row count for lookups that don't ask for one.
pub const PAGE_LIMIT: u64 = 99;

/// Largest row count a single logical request may ask for.
pub const MAX_ROWS: u64 = 100_000;

/// One bounded sub-query of a larger request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Rows requested by this page.
    pub limit: u64,
    /// Rows skipped before this page; pages are ordered by offset.
    pub offset: u64,
    /// Complete statement, terminated with `LIMIT .. OFFSET ..;`.
    pub statement: String,
}

impl Page {
    fn new(base: &str, limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            statement: format!("{} LIMIT {} OFFSET {};", base, limit, offset),
        }
    }
}

/// Divides `base` into pages that together request exactly `total` rows.
///
/// Every page but the last asks for [`PAGE_LIMIT`] rows; the last one carries
/// the remainder. A request of `PAGE_LIMIT` rows or fewer is a single page.
pub fn divide(base: &str, total: u64) -> Vec<Page> {
    let pages = if total > PAGE_LIMIT {
        total.div_ceil(PAGE_LIMIT)
    } else {
        1
    };

    let mut remaining = total;
    let mut offset = 0;
    (0..pages)
        .map(|_| {
            let limit = remaining.min(PAGE_LIMIT);
            let page = Page::new(base, limit, offset);
            remaining -= limit;
            offset += limit;
            page
        })
        .collect()
}
