use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;

/// Raw `?page=&per_page=` query; anything unparsable falls back to defaults
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

/// Normalized page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page: page.max(1), per_page: per_page.max(1) }
    }

    /// Out-of-range `per_page` resets to the default rather than clamping.
    pub fn from_query(query: &PageQuery, api: &ApiConfig) -> Self {
        let page = query
            .page
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p.min(u32::MAX as i64) as u32)
            .unwrap_or(1);

        let per_page = query
            .per_page
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|n| *n >= 1 && *n <= api.max_per_page as i64)
            .map(|n| n as u32)
            .unwrap_or(api.default_per_page);

        Self::new(page, per_page)
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }

    pub fn meta(&self, total: i64) -> PageMeta {
        let per_page = self.per_page as i64;
        PageMeta {
            page: self.page,
            per_page: self.per_page,
            total,
            total_pages: (total.max(0) + per_page - 1) / per_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ApiConfig {
        ApiConfig { default_per_page: 10, max_per_page: 100, enable_request_logging: false }
    }

    fn query(page: Option<&str>, per_page: Option<&str>) -> PageQuery {
        PageQuery { page: page.map(String::from), per_page: per_page.map(String::from) }
    }

    #[test]
    fn defaults_when_missing() {
        let p = Pagination::from_query(&PageQuery::default(), &api());
        assert_eq!(p, Pagination { page: 1, per_page: 10 });
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn out_of_range_values_fall_back() {
        assert_eq!(Pagination::from_query(&query(Some("0"), Some("500")), &api()), Pagination::new(1, 10));
        assert_eq!(Pagination::from_query(&query(Some("-3"), Some("0")), &api()), Pagination::new(1, 10));
        assert_eq!(Pagination::from_query(&query(Some("abc"), Some("x")), &api()), Pagination::new(1, 10));
        assert_eq!(Pagination::from_query(&query(Some("3"), Some("100")), &api()), Pagination::new(3, 100));
    }

    #[test]
    fn offset_and_total_pages() {
        let p = Pagination::new(3, 20);
        assert_eq!(p.offset(), 40);
        assert_eq!(p.limit(), 20);
        assert_eq!(p.meta(41).total_pages, 3);
        assert_eq!(p.meta(40).total_pages, 2);
        assert_eq!(p.meta(0).total_pages, 0);
    }
}
