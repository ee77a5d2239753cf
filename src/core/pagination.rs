use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

/// Page/limit query parameters shared by listing endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Pagination metadata returned alongside paginated lists.
///
/// A `page` or `limit` of zero (or an absent parameter) falls back to the
/// defaults. A page past the end of the collection is not an error; the
/// caller simply gets an empty page.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub limit: u32,
    pub total_count: i64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    #[serde(skip)]
    pub skip: u64,
}

impl Pagination {
    pub fn new(page: Option<u32>, limit: Option<u32>, total_count: i64) -> Self {
        let current_page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);

        let total_pages = (total_count.max(0) as u64).div_ceil(u64::from(limit)) as u32;

        Self {
            current_page,
            limit,
            total_count,
            total_pages,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
            skip: u64::from(current_page - 1) * u64::from(limit),
        }
    }

    pub fn from_query(query: PageQuery, total_count: i64) -> Self {
        Self::new(query.page, query.limit, total_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Pagination::new(None, None, 25);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.limit, 10);
        assert_eq!(p.skip, 0);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_zero_falls_back_to_defaults() {
        let p = Pagination::new(Some(0), Some(0), 25);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn test_first_page_flags() {
        let p = Pagination::new(Some(1), Some(10), 25);
        assert!(p.has_next_page);
        assert!(!p.has_prev_page);
    }

    #[test]
    fn test_last_page_flags() {
        let p = Pagination::new(Some(3), Some(10), 25);
        assert_eq!(p.skip, 20);
        assert!(!p.has_next_page);
        assert!(p.has_prev_page);
    }

    #[test]
    fn test_empty_collection() {
        let p = Pagination::new(None, None, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next_page);
        assert!(!p.has_prev_page);
    }

    #[test]
    fn test_page_past_end_is_not_an_error() {
        let p = Pagination::new(Some(9), Some(10), 25);
        assert_eq!(p.skip, 80);
        assert!(!p.has_next_page);
    }
}
