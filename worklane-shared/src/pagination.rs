/// Pagination for list endpoints
///
/// Every list endpoint accepts `page`, `limit`, `search`, `sort`, and
/// `order` query parameters and returns a [`Page`] with the data plus
/// pagination metadata. Out-of-range values are normalized, never
/// rejected: `page` below 1 defaults to 1 and `limit` is clamped to
/// 1..=100.
///
/// # Example
///
/// ```
/// use worklane_shared::pagination::PageRequest;
///
/// let req = PageRequest::new(Some(0), Some(1000));
/// assert_eq!(req.page, 1);
/// assert_eq!(req.limit, 100);
/// assert_eq!(req.offset(), 0);
/// ```

use serde::{Deserialize, Serialize};

/// Hard cap on page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size when `limit` is omitted
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Raw list query parameters as they arrive on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// 1-based page number
    pub page: Option<i64>,

    /// Page size (clamped to 1..=100)
    pub limit: Option<i64>,

    /// Case-insensitive substring filter
    pub search: Option<String>,

    /// Sort field (whitelisted per resource)
    pub sort: Option<String>,

    /// Sort direction: "asc" or "desc"
    pub order: Option<String>,
}

impl ListParams {
    /// Normalized page/limit pair for this request
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    /// Sort direction, defaulting to descending
    pub fn sort_order(&self) -> SortOrder {
        self.order
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or(SortOrder::Desc)
    }

    /// Search term with empty strings treated as absent
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Normalized page number and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number (always >= 1)
    pub page: i64,

    /// Page size (always in 1..=100)
    pub limit: i64,
}

impl PageRequest {
    /// Normalizes raw page/limit values
    ///
    /// `page` below 1 defaults to 1; `limit` outside 1..=100 is clamped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Row offset for the underlying query
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses "asc"/"desc" (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Pagination metadata returned alongside every list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current 1-based page
    pub current_page: i64,

    /// Total number of pages (0 when there are no items)
    pub total_pages: i64,

    /// Total number of matching items
    pub total_items: i64,

    /// Page size used
    pub items_per_page: i64,

    /// Whether a later page exists
    pub has_next_page: bool,

    /// Whether an earlier page exists
    pub has_prev_page: bool,

    /// Next page number, if any
    pub next_page: Option<i64>,

    /// Previous page number, if any
    pub prev_page: Option<i64>,
}

/// One page of results plus pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The items on this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Builds a page from fetched rows and a total count
    pub fn new(data: Vec<T>, request: PageRequest, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + request.limit - 1) / request.limit
        };

        let has_next_page = request.page < total_pages;
        let has_prev_page = request.page > 1 && total_items > 0;

        Self {
            data,
            pagination: Pagination {
                current_page: request.page,
                total_pages,
                total_items,
                items_per_page: request.limit,
                has_next_page,
                has_prev_page,
                next_page: has_next_page.then_some(request.page + 1),
                prev_page: has_prev_page.then(|| (request.page - 1).min(total_pages)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let req = PageRequest::new(Some(1), Some(1000));
        assert_eq!(req.limit, 100);
    }

    #[test]
    fn test_limit_clamped_to_min() {
        let req = PageRequest::new(Some(1), Some(0));
        assert_eq!(req.limit, 1);

        let req = PageRequest::new(Some(1), Some(-5));
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn test_page_below_one_defaults_to_one() {
        let req = PageRequest::new(Some(0), Some(10));
        assert_eq!(req.page, 1);

        let req = PageRequest::new(Some(-3), Some(10));
        assert_eq!(req.page, 1);
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::new(Some(3), Some(20));
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("sideways"), None);
    }

    #[test]
    fn test_empty_page_metadata() {
        let page: Page<i32> = Page::new(vec![], PageRequest::new(Some(1), Some(10)), 0);

        assert_eq!(page.pagination.total_items, 0);
        assert_eq!(page.pagination.total_pages, 0);
        assert!(!page.pagination.has_next_page);
        assert!(!page.pagination.has_prev_page);
        assert_eq!(page.pagination.next_page, None);
        assert_eq!(page.pagination.prev_page, None);
    }

    #[test]
    fn test_middle_page_metadata() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], PageRequest::new(Some(2), Some(3)), 8);

        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
        assert_eq!(page.pagination.next_page, Some(3));
        assert_eq!(page.pagination.prev_page, Some(1));
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let page: Page<i32> = Page::new(vec![], PageRequest::new(None, None), 0);
        let value = serde_json::to_value(&page).unwrap();
        let meta = value.get("pagination").unwrap();

        assert!(meta.get("currentPage").is_some());
        assert!(meta.get("totalItems").is_some());
        assert!(meta.get("hasNextPage").is_some());
        assert!(meta.get("prevPage").is_some());
    }

    #[test]
    fn test_search_term_trims_empty() {
        let params = ListParams {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.search_term(), None);

        let params = ListParams {
            search: Some("alpha".to_string()),
            ..Default::default()
        };
        assert_eq!(params.search_term(), Some("alpha"));
    }
}
