//! Page-number strip with ellipses.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

/// Pages shown on each side of the current one.
const WINDOW: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// First page, last page, and `current ± 1`, with an ellipsis wherever
/// pages are skipped. Empty when there is only one page.
#[must_use]
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let mut items = vec![PageItem::Page(1)];

    if current.saturating_sub(WINDOW) > 2 {
        items.push(PageItem::Ellipsis);
    }
    let start = current.saturating_sub(WINDOW).max(2);
    let end = (current + WINDOW).min(total - 1);
    items.extend((start..=end).map(PageItem::Page));
    if current + WINDOW < total - 1 {
        items.push(PageItem::Ellipsis);
    }

    items.push(PageItem::Page(total));
    items
}

#[must_use]
pub fn has_prev(current: u32) -> bool {
    current > 1
}

#[must_use]
pub fn has_next(current: u32, total: u32) -> bool {
    current < total
}
