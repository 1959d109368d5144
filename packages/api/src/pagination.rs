// ABOUTME: Pagination utilities for the task list endpoint
// ABOUTME: Page-number query parsing and the count/next/previous/results envelope

use serde::{Deserialize, Serialize};
use taskbot_core::PAGE_SIZE;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    /// Raw `page` value; kept as text so a malformed value maps to "invalid page"
    pub page: Option<String>,
}

impl PaginationParams {
    pub fn with_page(page: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
        }
    }

    /// The requested page, `None` when the value is not a positive integer
    pub fn page(&self) -> Option<i64> {
        match self.page.as_deref() {
            None => Some(MIN_PAGE),
            Some(raw) => raw.parse::<i64>().ok().filter(|page| *page >= MIN_PAGE),
        }
    }

    pub fn limit() -> i64 {
        PAGE_SIZE
    }

    /// Row offset of `page`, `None` when it does not fit in an `i64`
    pub fn offset(page: i64) -> Option<i64> {
        page.checked_sub(1)?.checked_mul(PAGE_SIZE)
    }
}

/// Number of pages for `total_items`; an empty collection still has one (empty) page
pub fn total_pages(total_items: i64) -> i64 {
    ((total_items + PAGE_SIZE - 1) / PAGE_SIZE).max(MIN_PAGE)
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Total number of items across all pages
    pub count: i64,
    /// Link to the next page, if any
    pub next: Option<String>,
    /// Link to the previous page, if any
    pub previous: Option<String>,
    /// The items of the current page
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Build the envelope for `page`, linking siblings relative to `base_url`
    pub fn new(results: Vec<T>, page: i64, total_items: i64, base_url: &str) -> Self {
        let next = (page < total_pages(total_items)).then(|| page_link(base_url, page + 1));
        let previous = (page > MIN_PAGE).then(|| page_link(base_url, page - 1));

        Self {
            count: total_items,
            next,
            previous,
            results,
        }
    }
}

fn page_link(base_url: &str, page: i64) -> String {
    if page == MIN_PAGE {
        base_url.to_string()
    } else {
        format!("{}?page={}", base_url, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: &str = "http://testserver/tasks/";

    #[test]
    fn test_default_page_is_first() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), Some(1));
        assert_eq!(PaginationParams::offset(1), Some(0));
    }

    #[rstest]
    #[case("0")]
    #[case("-2")]
    #[case("abc")]
    #[case("")]
    fn test_invalid_page_values(#[case] raw: &str) {
        assert_eq!(PaginationParams::with_page(raw).page(), None);
    }

    #[test]
    fn test_offset_calculation() {
        assert_eq!(PaginationParams::offset(3), Some(20));
        assert_eq!(PaginationParams::limit(), 10);
    }

    #[test]
    fn test_offset_overflow_is_none() {
        assert_eq!(PaginationParams::offset(i64::MAX), None);
        assert_eq!(PaginationParams::offset(i64::MAX / PAGE_SIZE + 2), None);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(10, 1)]
    #[case(11, 2)]
    #[case(25, 3)]
    fn test_total_pages(#[case] total: i64, #[case] pages: i64) {
        assert_eq!(total_pages(total), pages);
    }

    #[test]
    fn test_first_page_links() {
        let response = PaginatedResponse::new(vec![1, 2], 1, 25, BASE);
        assert_eq!(response.count, 25);
        assert_eq!(response.next.as_deref(), Some("http://testserver/tasks/?page=2"));
        assert_eq!(response.previous, None);
    }

    #[test]
    fn test_second_page_links_back_without_page_param() {
        let response = PaginatedResponse::new(vec![1], 2, 25, BASE);
        assert_eq!(response.previous.as_deref(), Some(BASE));
        assert_eq!(response.next.as_deref(), Some("http://testserver/tasks/?page=3"));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let response = PaginatedResponse::new(vec![1], 3, 25, BASE);
        assert_eq!(response.next, None);
        assert_eq!(response.previous.as_deref(), Some("http://testserver/tasks/?page=2"));
    }

    #[test]
    fn test_empty_collection() {
        let response: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 1, 0, BASE);
        assert_eq!(response.count, 0);
        assert!(response.next.is_none());
        assert!(response.previous.is_none());
        assert!(response.results.is_empty());
    }
}
