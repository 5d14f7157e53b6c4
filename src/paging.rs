//! Client-side pagination over an already-loaded list.
//!
//! The backend returns whole filtered lists; page changes only re-slice the
//! resident data and never trigger a network call. The derived window is
//! always recomputed from the list length plus (page, page_size) - it is
//! never mutated independently.

/// A 1-based page cursor with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    /// Create a pager positioned on page 1. A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size and snap back to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Total number of pages for `count` items. An empty list still has one
    /// (empty) page so the controls always have a valid current page.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Half-open `[start, end)` window of the current page.
    pub fn window(&self, count: usize) -> (usize, usize) {
        let start = (self.page - 1) * self.page_size;
        let start = start.min(count);
        let end = (start + self.page_size).min(count);
        (start, end)
    }

    /// Slice of `items` visible on the current page.
    pub fn page_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.window(items.len());
        &items[start..end]
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, count: usize) -> bool {
        self.page < self.total_pages(count)
    }

    /// Jump to a specific page, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize, count: usize) {
        self.page = page.clamp(1, self.total_pages(count));
    }

    pub fn next(&mut self, count: usize) {
        if self.has_next(count) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    /// Back to page 1 (used when the filter changes).
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Keep the admin's place after a reload: if the list shrank below the
    /// current page, fall back to the last valid page.
    pub fn clamp(&mut self, count: usize) {
        let total = self.total_pages(count);
        if self.page > total {
            self.page = total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let pager = Pager::new(10);
        assert_eq!(pager.total_pages(0), 1);
        assert_eq!(pager.total_pages(1), 1);
        assert_eq!(pager.total_pages(10), 1);
        assert_eq!(pager.total_pages(11), 2);
        assert_eq!(pager.total_pages(20), 2);
        assert_eq!(pager.total_pages(21), 3);
    }

    #[test]
    fn test_twelve_items_page_size_ten() {
        // 12 pending rows at page size 10: page 1 shows 10, page 2 shows 2.
        let items: Vec<u32> = (0..12).collect();
        let mut pager = Pager::new(10);

        assert_eq!(pager.page_items(&items).len(), 10);
        assert!(pager.has_next(items.len()));
        assert!(!pager.has_prev());

        pager.next(items.len());
        assert_eq!(pager.page(), 2);
        assert_eq!(pager.page_items(&items), &[10, 11]);
        assert!(!pager.has_next(items.len()));
        assert!(pager.has_prev());

        // Next on the last page is a no-op.
        pager.next(items.len());
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_exact_multiple_last_page_is_full() {
        let items: Vec<u32> = (0..20).collect();
        let mut pager = Pager::new(10);
        pager.set_page(2, items.len());
        assert_eq!(pager.page_items(&items).len(), 10);
        assert!(!pager.has_next(items.len()));
    }

    #[test]
    fn test_set_page_clamps_out_of_range() {
        let mut pager = Pager::new(10);
        pager.set_page(99, 25);
        assert_eq!(pager.page(), 3);
        pager.set_page(0, 25);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_clamp_after_shrinking_reload() {
        let mut pager = Pager::new(10);
        pager.set_page(3, 25);
        // Reload came back with fewer rows than the current page needs.
        pager.clamp(12);
        assert_eq!(pager.page(), 2);
        // A reload with the same count leaves the cursor alone.
        pager.clamp(12);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_empty_list_has_single_empty_page() {
        let items: Vec<u32> = Vec::new();
        let pager = Pager::new(10);
        assert_eq!(pager.total_pages(0), 1);
        assert!(pager.page_items(&items).is_empty());
        assert!(!pager.has_next(0));
        assert!(!pager.has_prev());
    }

    #[test]
    fn test_prev_stops_at_first_page() {
        let mut pager = Pager::new(5);
        pager.prev();
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_set_page_size_resets_to_first_page() {
        let mut pager = Pager::new(10);
        pager.set_page(2, 30);
        pager.set_page_size(25);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.total_pages(30), 2);
    }
}
