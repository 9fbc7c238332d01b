//! Shared query parameter types for list endpoints.

use hostelia_core::listing::ListFilter;
use hostelia_core::pagination::Pagination;
use serde::Deserialize;

/// `?page=&limit=` (1-based pages). Clamped by [`Pagination::from_request`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn pagination(&self, total: i64) -> Pagination {
        Pagination::from_request(self.page, self.limit, total)
    }
}

/// Filter and page parameters accepted by the student and complaint lists.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub hostel: Option<String>,
    pub year: Option<i16>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl ListParams {
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            hostel: self.hostel.clone(),
            year: self.year,
            search: self.search.clone(),
            status: self.status.clone(),
            category: self.category.clone(),
        }
        .normalized()
    }

    pub fn pagination(&self, total: i64) -> Pagination {
        Pagination::from_request(self.page, self.limit, total)
    }
}

/// `?hostel=` for endpoints where admins pick a hostel.
#[derive(Debug, Default, Deserialize)]
pub struct HostelParams {
    pub hostel: Option<String>,
}
