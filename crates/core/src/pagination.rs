//! Page-based pagination.
//!
//! List endpoints take `?page=&limit=` (1-based pages) and answer with the
//! items plus a [`PageMeta`]; clients drive Previous/Next controls from the
//! same [`Pagination`] arithmetic.

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum page size for list endpoints.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided 1-based page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Current position within a paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl Pagination {
    /// Build from raw request values, clamping page and limit.
    pub fn from_request(page: Option<i64>, limit: Option<i64>, total: i64) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            total: total.max(0),
        }
    }

    /// `ceil(total / limit)`, but never less than one page so an empty
    /// collection still reads "Page 1 of 1".
    pub fn total_pages(&self) -> i64 {
        let limit = self.limit.max(1);
        ((self.total + limit - 1) / limit).max(1)
    }

    /// Row offset for the current page. Saturates for page numbers far past
    /// the end, which then read as an empty page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).max(0).saturating_mul(self.limit)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn previous_page(&self) -> Option<i64> {
        self.has_previous().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<i64> {
        self.has_next().then(|| self.page + 1)
    }

    /// Human-readable position, e.g. `"Page 2 of 5"`.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages(),
        }
    }
}

/// Pagination block serialized alongside list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl From<PageMeta> for Pagination {
    fn from(meta: PageMeta) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            total: meta.total,
        }
    }
}

/// A page of items with its pagination block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: &Pagination) -> Self {
        Self {
            items,
            pagination: pagination.meta(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, 10, 100), 10);
        assert_eq!(clamp_limit(Some(0), 10, 100), 1);
        assert_eq!(clamp_limit(Some(-5), 10, 100), 1);
        assert_eq!(clamp_limit(Some(500), 10, 100), 100);
    }

    #[test]
    fn clamp_page_bounds() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(7)), 7);
    }

    #[test]
    fn total_pages_is_ceiling() {
        let cases = [(1, 10, 1), (10, 10, 1), (11, 10, 2), (95, 10, 10), (101, 25, 5)];
        for (total, limit, expected) in cases {
            let p = Pagination { page: 1, limit, total };
            assert_eq!(p.total_pages(), expected, "total={total} limit={limit}");
            assert_eq!(p.label(), format!("Page 1 of {expected}"));
        }
    }

    #[test]
    fn empty_collection_is_one_page() {
        let p = Pagination::from_request(None, None, 0);
        assert_eq!(p.total_pages(), 1);
        assert!(!p.has_previous());
        assert!(!p.has_next());
        assert_eq!(p.label(), "Page 1 of 1");
    }

    #[test]
    fn boundary_pages_disable_controls() {
        let first = Pagination { page: 1, limit: 10, total: 35 };
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.next_page(), Some(2));
        assert_eq!(first.previous_page(), None);

        let last = Pagination { page: 4, limit: 10, total: 35 };
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.next_page(), None);
        assert_eq!(last.label(), "Page 4 of 4");
    }

    #[test]
    fn offset_matches_page() {
        let p = Pagination::from_request(Some(3), Some(20), 100);
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let p = Pagination::from_request(Some(i64::MAX), Some(100), 5);
        assert_eq!(p.offset(), i64::MAX);
        assert!(p.has_previous());
        assert!(!p.has_next());
        assert_eq!(p.next_page(), None);
        assert_eq!(p.total_pages(), 1);
    }

    #[test]
    fn meta_serializes_camel_case() {
        let p = Pagination { page: 2, limit: 10, total: 15 };
        let json = serde_json::to_value(p.meta()).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(Pagination::from(p.meta()), p);
    }
}
