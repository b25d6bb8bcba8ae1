//! Pagination for the wine collection

use serde::{Deserialize, Serialize};

/// Maximum wines per page
pub const MAX_PER_PAGE: u32 = 100;

/// Default wines per page
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Page window over the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (1..=100)
    pub per_page: u32,
}

impl Pagination {
    /// Page is clamped to at least 1, per page to 1..=MAX_PER_PAGE.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let per_page = i64::from(self.per_page.max(1));
        let pages = (self.total + per_page - 1) / per_page;
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// `?page=&per_page=` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(
            params.page.unwrap_or(1),
            params.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: i64, page: u32, per_page: u32) -> Paginated<()> {
        Paginated {
            items: vec![],
            total,
            page,
            per_page,
        }
    }

    #[test]
    fn offset_and_limit() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(4, 25).offset(), 75);
        assert_eq!(Pagination::new(4, 25).limit(), 25);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Pagination::new(0, 0), Pagination { page: 1, per_page: 1 });
        assert_eq!(Pagination::new(2, 5000).per_page, MAX_PER_PAGE);
    }

    #[test]
    fn params_default_to_first_page() {
        let page = Pagination::from(PaginationParams::default());
        assert_eq!(page, Pagination::default());
        assert_eq!(page.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn total_pages_never_zero() {
        assert_eq!(page_of(0, 1, 20).total_pages(), 1);
        assert_eq!(page_of(41, 1, 20).total_pages(), 3);
        assert!(page_of(41, 2, 20).has_next());
        assert!(!page_of(41, 3, 20).has_next());
    }

    #[test]
    fn map_keeps_window() {
        let mapped = Paginated {
            items: vec![1, 2],
            total: 12,
            page: 2,
            per_page: 10,
        }
        .map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!((mapped.total, mapped.page, mapped.per_page), (12, 2, 10));
    }
}
