//! Offset pagination shared by every list endpoint.
//!
//! A [`PageRequest`] is normalized from raw query values, turned into a
//! zero-based inclusive [`RowRange`] for the store, and the store's rows plus
//! its exact count are wrapped in a [`Page`] envelope.
//!
//! The requested page is never clamped to the last page: asking for page 40
//! of a 3-page list yields an empty `items` array, not an error.

use serde::Serialize;

use crate::page_window::PageNav;

/// Page used when the query omits `page` or sends something non-numeric.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the query omits `pageSize` or sends something non-numeric.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// A normalized page request. Both fields are always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request from already-parsed values, applying defaults and the
    /// floor of 1.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Values that are absent, empty, or not numbers fall back to the
    /// defaults. Fractional values are floored (`"2.7"` is page 2).
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self::new(parse_lenient(page), parse_lenient(page_size))
    }

    /// Zero-based inclusive row range covered by this page.
    pub fn range(&self) -> RowRange {
        let from = (self.page - 1).saturating_mul(self.page_size);
        RowRange {
            from,
            to: from.saturating_add(self.page_size - 1),
        }
    }
}

fn parse_lenient(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.floor() as i64)
    })
}

/// Zero-based, inclusive `[from, to]` row range handed to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: i64,
    pub to: i64,
}

impl RowRange {
    /// Number of rows to skip (SQL `OFFSET`).
    pub fn offset(&self) -> i64 {
        self.from
    }

    /// Maximum number of rows to return (SQL `LIMIT`).
    pub fn limit(&self) -> i64 {
        self.to - self.from + 1
    }
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    let page_size = page_size.max(1);
    let total = total.max(0);
    (total / page_size + i64::from(total % page_size != 0)).max(1)
}

/// Pagination envelope returned by every list operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Wrap one ranged read and its exact count.
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages: total_pages(total, request.page_size),
        }
    }

    /// Navigation state for rendering page controls around this page.
    pub fn nav(&self) -> PageNav {
        PageNav::new(self.page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent_or_garbage() {
        assert_eq!(PageRequest::from_query(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::from_query(Some("abc"), Some("")),
            PageRequest { page: 1, page_size: 5 }
        );
    }

    #[test]
    fn values_are_floored_at_one() {
        let req = PageRequest::from_query(Some("0"), Some("-7"));
        assert_eq!(req, PageRequest { page: 1, page_size: 1 });
    }

    #[test]
    fn fractional_values_are_floored() {
        let req = PageRequest::from_query(Some("2.7"), Some("10.2"));
        assert_eq!(req, PageRequest { page: 2, page_size: 10 });
    }

    #[test]
    fn range_is_zero_based_and_inclusive() {
        let req = PageRequest::new(Some(3), Some(5));
        let range = req.range();
        assert_eq!(range, RowRange { from: 10, to: 14 });
        assert_eq!(range.offset(), 10);
        assert_eq!(range.limit(), 5);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let range = PageRequest::new(Some(i64::MAX), Some(i64::MAX)).range();
        assert_eq!(range.from, i64::MAX);
        assert!(range.limit() >= 1);
    }

    #[test]
    fn total_pages_matches_ceiling_with_floor_of_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(12, 1), 12);
    }

    #[test]
    fn page_does_not_clamp_requested_page() {
        let page: Page<i32> = Page::new(vec![], PageRequest::new(Some(9), Some(5)), 12);
        assert_eq!(page.page, 9);
        assert_eq!(page.total_pages, 3);
        assert!(page.items.is_empty());
    }

    #[test]
    fn nav_describes_controls_for_the_last_page() {
        let page: Page<i32> = Page::new(vec![11, 12], PageRequest::new(Some(3), Some(5)), 12);
        let nav = page.nav();
        assert_eq!(nav.window, vec![1, 2, 3]);
        assert!(nav.has_prev());
        assert!(!nav.has_next());
        assert_eq!(nav.prev(), Some(2));
        assert_eq!(nav.next(), None);
        assert_eq!(nav.last(), 3);
    }

    #[test]
    fn nav_for_empty_listing_disables_everything() {
        let page: Page<i32> = Page::new(vec![], PageRequest::default(), 0);
        let nav = page.nav();
        assert_eq!(nav.window, vec![1]);
        assert!(!nav.has_prev());
        assert!(!nav.has_next());
    }

    #[test]
    fn envelope_serializes_in_camel_case() {
        let page = Page::new(vec![1, 2], PageRequest::new(Some(3), Some(5)), 12);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [1, 2],
                "page": 3,
                "pageSize": 5,
                "total": 12,
                "totalPages": 3,
            })
        );
    }
}
