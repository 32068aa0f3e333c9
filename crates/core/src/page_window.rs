//! Sliding window of page numbers shown by list navigation controls.

/// Number of page buttons a control shows when the caller has no preference.
pub const DEFAULT_WINDOW_SIZE: i64 = 5;

/// Compute the contiguous ascending run of page numbers to expose around
/// `page`.
///
/// The run has `min(size, total_pages)` entries, stays within
/// `[1, total_pages]`, and contains `page` whenever `page` is in range. Near
/// either end the window slides rather than shrinking.
///
/// ```
/// use iotwatch_core::page_window::page_window;
///
/// assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
/// assert_eq!(page_window(6, 10, 5), vec![4, 5, 6, 7, 8]);
/// assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
/// assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
/// ```
pub fn page_window(page: i64, total_pages: i64, size: i64) -> Vec<i64> {
    let total_pages = total_pages.max(1);
    let size = size.max(0);
    let half = size / 2;

    let mut start = page.saturating_sub(half).max(1);
    let end = total_pages.min(start.saturating_add(size - 1));
    if end - start + 1 < size {
        start = (end - size + 1).max(1);
    }

    (start..=end).collect()
}

/// State of a First / Prev / numbers / Next / Last control for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNav {
    pub page: i64,
    pub total_pages: i64,
    pub window: Vec<i64>,
}

impl PageNav {
    pub fn new(page: i64, total_pages: i64) -> Self {
        Self::with_size(page, total_pages, DEFAULT_WINDOW_SIZE)
    }

    pub fn with_size(page: i64, total_pages: i64, size: i64) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            page,
            total_pages,
            window: page_window(page, total_pages, size),
        }
    }

    /// First and Prev are enabled.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next and Last are enabled.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev(&self) -> Option<i64> {
        self.has_prev().then(|| (self.page - 1).min(self.total_pages))
    }

    pub fn next(&self) -> Option<i64> {
        self.has_next().then(|| (self.page + 1).max(1))
    }

    pub fn last(&self) -> i64 {
        self.total_pages
    }
}
