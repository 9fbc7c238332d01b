//! List filters for students, wardens and complaints.
//!
//! A [`ListFilter`] is what the client edits; it is merged with the
//! pagination position into query parameters, and the server reads it
//! back from the same parameters.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Maximum length of the free-text query.
pub const MAX_SEARCH_LEN: usize = 100;

/// Filter criteria shared by the list endpoints. Unused fields are ignored
/// by endpoints that do not support them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    pub hostel: Option<String>,
    pub year: Option<i16>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ListFilter {
    /// Trim every text field and drop empty ones; cap the search length.
    pub fn normalized(&self) -> Self {
        Self {
            hostel: clean(&self.hostel),
            year: self.year.filter(|y| *y > 0),
            search: clean(&self.search).map(|s| s.chars().take(MAX_SEARCH_LEN).collect()),
            status: clean(&self.status),
            category: clean(&self.category),
        }
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merge(&self, other: &ListFilter) -> Self {
        let other = other.normalized();
        let base = self.normalized();
        Self {
            hostel: other.hostel.or(base.hostel),
            year: other.year.or(base.year),
            search: other.search.or(base.search),
            status: other.status.or(base.status),
            category: other.category.or(base.category),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized() == ListFilter::default()
    }

    /// Query parameters for this filter at the given page, in a stable order.
    pub fn query_pairs(&self, pagination: &Pagination) -> Vec<(&'static str, String)> {
        let f = self.normalized();
        let mut pairs = vec![
            ("page", pagination.page.to_string()),
            ("limit", pagination.limit.to_string()),
        ];
        if let Some(v) = f.hostel {
            pairs.push(("hostel", v));
        }
        if let Some(v) = f.year {
            pairs.push(("year", v.to_string()));
        }
        if let Some(v) = f.search {
            pairs.push(("search", v));
        }
        if let Some(v) = f.status {
            pairs.push(("status", v));
        }
        if let Some(v) = f.category {
            pairs.push(("category", v));
        }
        pairs
    }

    /// SQL `ILIKE` pattern for the search text, with `%`, `_` and `\`
    /// escaped so they match literally.
    pub fn search_pattern(&self) -> Option<String> {
        clean(&self.search).map(|s| {
            let escaped = s
                .chars()
                .take(MAX_SEARCH_LEN)
                .fold(String::with_capacity(s.len() + 2), |mut acc, c| {
                    if matches!(c, '%' | '_' | '\\') {
                        acc.push('\\');
                    }
                    acc.push(c);
                    acc
                });
            format!("%{escaped}%")
        })
    }
}

/// Case-insensitive name ordering used for list display.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort `items` by the name returned from `name`, case-insensitively.
pub fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| compare_names(name(a), name(b)));
}

/// Case-insensitive substring match of `query` against any of `fields`.
/// An empty query matches everything.
pub fn matches_search(fields: &[&str], query: &str) -> bool {
    let q = query.trim().to_lowercase();
    q.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&q))
}
