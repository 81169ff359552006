//! Pagination utilities for service layer
//!
//! `PageRequest` mirrors the query string of the paginated listing
//! (`page`, `size`, `sortBy`, `sortDir`) and `Page` carries the totals back.

use sea_orm::Order;
use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 0-based page index
    #[serde(default)]
    pub page: u64,
    /// items per page
    #[serde(default = "default_size")]
    pub size: u64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

fn default_size() -> u64 { 10 }
fn default_sort_by() -> String { "id".into() }
fn default_sort_dir() -> String { "ASC".into() }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for Order {
    fn from(d: SortDirection) -> Self {
        match d {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, size: u64, sort_by: &str, sort_dir: &str) -> Self {
        Self { page, size, sort_by: sort_by.to_string(), sort_dir: sort_dir.to_string() }
    }

    /// Clamp page size to 1..=100
    pub fn normalize(&self) -> (u64, u64) {
        (self.page, self.size.clamp(1, 100))
    }

    /// Row offset of the requested page; `None` when it overflows or exceeds
    /// what the store can address.
    pub fn offset(&self) -> Option<u64> {
        let (page, size) = self.normalize();
        page.checked_mul(size).filter(|o| *o <= i64::MAX as u64)
    }

    /// "ASC" in any case is ascending; everything else descends.
    pub fn direction(&self) -> SortDirection {
        if self.sort_dir.eq_ignore_ascii_case("ASC") { SortDirection::Asc } else { SortDirection::Desc }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: default_size(), sort_by: default_sort_by(), sort_dir: default_sort_dir() }
    }
}

/// One page of results plus totals over the whole result set.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_size() {
        assert_eq!(PageRequest::new(3, 0, "id", "ASC").normalize(), (3, 1));
        assert_eq!(PageRequest::new(0, 1000, "id", "ASC").normalize(), (0, 100));
    }

    #[test]
    fn offset_rejects_unaddressable_pages() {
        assert_eq!(PageRequest::new(3, 10, "id", "ASC").offset(), Some(30));
        assert_eq!(PageRequest::new(u64::MAX / 2, 10, "id", "ASC").offset(), None);
        assert_eq!(PageRequest::new(i64::MAX as u64, 1, "id", "ASC").offset(), Some(i64::MAX as u64));
        assert_eq!(PageRequest::new(i64::MAX as u64, 2, "id", "ASC").offset(), None);
    }

    #[test]
    fn direction_is_case_insensitive_asc_else_desc() {
        assert_eq!(PageRequest::new(0, 10, "id", "asc").direction(), SortDirection::Asc);
        assert_eq!(PageRequest::new(0, 10, "id", "ASC").direction(), SortDirection::Asc);
        assert_eq!(PageRequest::new(0, 10, "id", "DESC").direction(), SortDirection::Desc);
        assert_eq!(PageRequest::new(0, 10, "id", "sideways").direction(), SortDirection::Desc);
    }

    #[test]
    fn default_values_are_sane() {
        let d = PageRequest::default();
        assert_eq!(d.page, 0);
        assert_eq!(d.size, 10);
        assert_eq!(d.sort_by, "id");
        assert_eq!(d.direction(), SortDirection::Asc);
    }
}
