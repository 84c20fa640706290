//! Offset pagination requests and response metadata.

use serde::{Deserialize, Serialize};

/// Default page size when the caller supplies none (or garbage).
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Hard cap on page size to bound result-set cost.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request. Page and limit are always ≥ 1, and limit is
/// capped at [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_PAGE_SIZE }
    }
}

impl PageRequest {
    /// Build a request with both values forced into their valid ranges.
    pub fn clamped(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Pagination metadata returned alongside every listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_jobs: u64,
    pub per_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Compute metadata for a page of a `total`-row result set.
    ///
    /// `total_pages` is at least 1 even when `total` is 0, so clients never
    /// render "page 1 of 0".
    pub fn compute(page: &PageRequest, total: u64) -> Self {
        let total_pages = (total.div_ceil(u64::from(page.limit)) as u32).max(1);
        Self {
            current_page: page.page,
            total_pages,
            total_jobs: total,
            per_page: page.limit,
            has_next: page.page < total_pages,
            has_prev: page.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_arithmetic() {
        assert_eq!(PageRequest::clamped(1, 10).offset(), 0);
        assert_eq!(PageRequest::clamped(2, 10).offset(), 10);
        assert_eq!(PageRequest::clamped(7, 25).offset(), 150);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(PageRequest::clamped(0, 0), PageRequest { page: 1, limit: 1 });
        assert_eq!(
            PageRequest::clamped(3, 10_000),
            PageRequest { page: 3, limit: MAX_PAGE_SIZE }
        );
    }

    #[test]
    fn test_empty_result_reports_one_page() {
        let meta = PaginationMeta::compute(&PageRequest::clamped(1, 10), 0);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.total_jobs, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_empty_result_beyond_first_page_still_has_prev() {
        let meta = PaginationMeta::compute(&PageRequest::clamped(3, 10), 0);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let page = PageRequest::clamped(1, 10);
        assert_eq!(PaginationMeta::compute(&page, 1).total_pages, 1);
        assert_eq!(PaginationMeta::compute(&page, 10).total_pages, 1);
        assert_eq!(PaginationMeta::compute(&page, 11).total_pages, 2);
        assert_eq!(PaginationMeta::compute(&page, 25).total_pages, 3);
    }

    #[test]
    fn test_middle_page_has_both_neighbors() {
        let meta = PaginationMeta::compute(&PageRequest::clamped(2, 10), 25);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);
    }
}
