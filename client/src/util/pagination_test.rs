use super::*;
use PageItem::{Ellipsis, Page};

#[test]
fn single_page_renders_nothing() {
    assert!(page_items(1, 1).is_empty());
    assert!(page_items(1, 0).is_empty());
}

#[test]
fn short_ranges_have_no_ellipsis() {
    assert_eq!(page_items(1, 3), vec![Page(1), Page(2), Page(3)]);
    assert_eq!(page_items(2, 4), vec![Page(1), Page(2), Page(3), Page(4)]);
}

#[test]
fn middle_page_gets_both_ellipses() {
    assert_eq!(page_items(5, 10), vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]);
}

#[test]
fn edges_get_one_ellipsis() {
    assert_eq!(page_items(1, 10), vec![Page(1), Page(2), Ellipsis, Page(10)]);
    assert_eq!(page_items(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
}

#[test]
fn out_of_range_current_is_clamped() {
    assert_eq!(page_items(99, 3), vec![Page(1), Page(2), Page(3)]);
}

#[test]
fn prev_next_bounds() {
    assert!(!has_prev(1));
    assert!(has_prev(2));
    assert!(has_next(2, 3));
    assert!(!has_next(3, 3));
}
