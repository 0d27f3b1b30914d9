//! Pagination types
//!
//! Page window arithmetic shared by the query and collection constructors.

use crate::config::PaginatorConfig;
use crate::request::PageRequest;

/// Offset/limit bounds of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number
    pub page: u64,
    /// Records per page
    pub per_page: u64,
    /// Number of records skipped before this page
    pub offset: u64,
    /// Maximum number of records on this page
    pub limit: u64,
}

impl PageWindow {
    /// Compute the window for a page
    ///
    /// Page 0 is read as page 1. Arithmetic saturates, so absurdly large
    /// pages produce a window past any real data instead of overflowing.
    pub fn new(page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        Self {
            page,
            per_page,
            offset: (page - 1).saturating_mul(per_page),
            limit: per_page,
        }
    }

    /// Exclusive end of the window
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }

    /// Check whether the window starts at or after the last record
    pub fn is_past(&self, total: u64) -> bool {
        self.offset >= total
    }
}

/// Number of pages needed for `total` records, 0 when there are none
pub fn last_page(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Current page for a request: its page parameter, else the configured default
pub fn resolve_page(config: &PaginatorConfig, request: &PageRequest) -> u64 {
    match request.page_number(&config.page_name) {
        Some(page) => page,
        None => {
            tracing::debug!(
                "No usable '{}' in request, using default page {}",
                config.page_name,
                config.default_page
            );
            config.default_page
        }
    }
}
