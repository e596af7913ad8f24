//! Fixed-size pagination over an ordered view

use crate::core::PaginationMeta;
use serde::Serialize;
use std::ops::Range;

/// Page size used when a view does not configure one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total_items`, never less than one
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Current page and page size of a view
///
/// The page size is fixed for the lifetime of a view; a zero page size is
/// clamped to 1 at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        if page_size == 0 {
            tracing::warn!("Page size 0 is invalid, using 1");
        }
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Same page size, on `page` (at least 1)
    ///
    /// The upper bound is only known once the list length is; see
    /// [`Paginator::from_state`].
    pub fn at(self, page: usize) -> Self {
        Self {
            current_page: page.max(1),
            ..self
        }
    }

    /// Same page size, first page
    pub fn first(self) -> Self {
        Self {
            current_page: 1,
            ..self
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Page navigation over a list of known length
///
/// The paginator has no state beyond `(current_page, total_pages)`; every
/// operation keeps `current_page` within `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    state: PageState,
    total_items: usize,
}

impl Paginator {
    /// Start on page 1
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            state: PageState::new(page_size),
            total_items,
        }
    }

    /// Resume from a page state, clamping its page to the current length
    pub fn from_state(state: PageState, total_items: usize) -> Self {
        let mut paginator = Self { state, total_items };
        paginator.go_to_page(state.current_page);
        paginator
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.state.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page() > 1
    }

    /// Advance one page; no-op on the last page
    pub fn next_page(&mut self) {
        if self.has_next() {
            self.state.current_page += 1;
        }
    }

    /// Go back one page; no-op on the first page
    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.state.current_page -= 1;
        }
    }

    /// Jump to `page`, clamped into `[1, total_pages]`
    pub fn go_to_page(&mut self, page: usize) {
        self.state.current_page = page.clamp(1, self.total_pages());
    }

    /// Back to page 1
    pub fn reset(&mut self) {
        self.state.current_page = 1;
    }

    /// Index range of the visible page within the ordered list
    pub fn range(&self) -> Range<usize> {
        let start = (self.current_page() - 1)
            .saturating_mul(self.page_size())
            .min(self.total_items);
        let end = start.saturating_add(self.page_size()).min(self.total_items);
        start..end
    }

    /// The visible page of `items`
    ///
    /// `items` is expected to have `total_items` elements; a shorter slice is
    /// cut at its end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta::new(self.current_page(), self.page_size(), self.total_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let paginator = Paginator::new(0, 3);
        assert_eq!(paginator.page_size(), 1);
        assert_eq!(paginator.total_pages(), 3);
    }

    #[test]
    fn test_next_and_prev_are_bounded() {
        let mut paginator = Paginator::new(10, 25);
        paginator.prev_page();
        assert_eq!(paginator.current_page(), 1);

        paginator.next_page();
        paginator.next_page();
        paginator.next_page();
        assert_eq!(paginator.current_page(), 3);
        assert!(!paginator.has_next());

        paginator.prev_page();
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut paginator = Paginator::new(10, 25);
        paginator.go_to_page(0);
        assert_eq!(paginator.current_page(), 1);
        paginator.go_to_page(paginator.total_pages() + 5);
        assert_eq!(paginator.current_page(), 3);
        paginator.reset();
        assert_eq!(paginator.current_page(), 1);
    }

    #[test]
    fn test_last_page_slice() {
        let items: Vec<usize> = (0..25).collect();
        let mut paginator = Paginator::new(10, items.len());
        paginator.go_to_page(3);
        assert_eq!(paginator.range(), 20..25);
        assert_eq!(paginator.slice(&items), &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<u8> = Vec::new();
        let mut paginator = Paginator::new(10, 0);
        paginator.next_page();
        assert_eq!(paginator.total_pages(), 1);
        assert_eq!(paginator.current_page(), 1);
        assert!(paginator.slice(&items).is_empty());
    }

    #[test]
    fn test_from_state_clamps_stale_page() {
        let mut wide = Paginator::new(10, 100);
        wide.go_to_page(9);
        let narrowed = Paginator::from_state(wide.state(), 12);
        assert_eq!(narrowed.current_page(), 2);
    }

    #[test]
    fn test_meta() {
        let mut paginator = Paginator::new(10, 25);
        paginator.go_to_page(2);
        let meta = paginator.meta();
        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);
    }
}
