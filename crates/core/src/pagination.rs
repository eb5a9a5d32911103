//! Page-number pagination helpers shared by every list endpoint.

use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A resolved `(page, page_size)` pair, always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Clamp user-supplied values: page floors at 1, page size to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Pagination metadata returned next to a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub page_size: i64,
}

impl PageInfo {
    pub fn new(request: PageRequest, total_items: i64) -> Self {
        let total_items = total_items.max(0);
        Self {
            current_page: request.page,
            total_pages: (total_items + request.page_size - 1) / request.page_size,
            total_items,
            page_size: request.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let req = PageRequest::new(Some(0), Some(500));
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, MAX_PAGE_SIZE);

        let req = PageRequest::new(Some(-3), Some(0));
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 1);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let req = PageRequest::new(Some(3), Some(10));
        assert_eq!(req.limit(), 10);
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest::new(Some(1), Some(10));
        assert_eq!(PageInfo::new(req, 0).total_pages, 0);
        assert_eq!(PageInfo::new(req, 10).total_pages, 1);
        assert_eq!(PageInfo::new(req, 11).total_pages, 2);
    }
}
