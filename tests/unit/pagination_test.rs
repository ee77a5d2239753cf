//! Tests for the shared pagination helper used by listing endpoints.

use glowdesk::core::Pagination;
use proptest::prelude::*;

#[test]
fn test_defaults_page_1_limit_10() {
    let p = Pagination::new(None, None, 25);

    assert_eq!(p.current_page, 1);
    assert_eq!(p.limit, 10);
    assert_eq!(p.skip, 0);
    assert_eq!(p.total_pages, 3);
    assert!(p.has_next_page);
    assert!(!p.has_prev_page);
}

#[test]
fn test_last_partial_page() {
    // 25 records at 10 per page: page 3 holds records 21-25
    let p = Pagination::new(Some(3), Some(10), 25);

    assert_eq!(p.skip, 20);
    assert!(!p.has_next_page);
    assert!(p.has_prev_page);
}

#[test]
fn test_exact_fit() {
    let p = Pagination::new(Some(2), Some(10), 20);

    assert_eq!(p.total_pages, 2);
    assert!(!p.has_next_page);
    assert!(p.has_prev_page);
}

#[test]
fn test_zero_inputs_fall_back_to_defaults() {
    let p = Pagination::new(Some(0), Some(0), 5);

    assert_eq!(p.current_page, 1);
    assert_eq!(p.limit, 10);
}

#[test]
fn test_empty_collection_has_no_pages() {
    let p = Pagination::new(None, None, 0);

    assert_eq!(p.total_pages, 0);
    assert!(!p.has_next_page);
    assert!(!p.has_prev_page);
}

#[test]
fn test_page_past_the_end_is_an_empty_page_not_an_error() {
    let p = Pagination::new(Some(99), Some(10), 25);

    assert_eq!(p.skip, 980);
    assert!(!p.has_next_page);
    assert!(p.has_prev_page);
}

proptest! {
    /// Page arithmetic invariants hold for any inputs.
    #[test]
    fn test_pagination_invariants(
        page in proptest::option::of(0u32..1000),
        limit in proptest::option::of(0u32..1000),
        total in 0i64..1_000_000,
    ) {
        let p = Pagination::new(page, limit, total);

        prop_assert!(p.current_page >= 1);
        prop_assert!(p.limit >= 1);
        prop_assert_eq!(p.skip, u64::from(p.current_page - 1) * u64::from(p.limit));

        // total_pages covers exactly the records
        let covered = i64::from(p.total_pages) * i64::from(p.limit);
        prop_assert!(covered >= total);
        prop_assert!(covered - total < i64::from(p.limit));

        // Page flags agree with the page arithmetic
        prop_assert_eq!(p.has_next_page, p.current_page < p.total_pages);
        prop_assert_eq!(p.has_prev_page, p.current_page > 1);
    }
}
