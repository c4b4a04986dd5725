//! Pagination
//!
//! Page cursor over a client-held list and the page-control strip model.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Page number buttons shown around the current page
pub const PAGE_WINDOW: usize = 5;

/// One button in the page-control strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Prev { enabled: bool },
    Page { number: usize, active: bool },
    Ellipsis,
    Next { enabled: bool },
}

/// 1-indexed page cursor. Always within `[1, max(total_pages, 1)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Record the list length, pulling the cursor back into range
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.page = self.page.clamp(1, self.total_pages().max(1));
    }

    /// Jump to `page`. Out-of-range or same-page requests are ignored.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.page > 1 && self.go_to(self.page - 1)
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Index range of the current page within the full list
    pub fn slice_range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    /// Items on the current page. `items.len()` should match `total`.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.slice_range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    /// Page-control strip: Prev, a window of page numbers with first/last and
    /// ellipses where pages are elided, Next. Empty when there is nothing to page.
    pub fn controls(&self, window: usize) -> Vec<PageControl> {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            return Vec::new();
        }
        let window = window.max(1).min(total_pages);
        let half = window / 2;
        let mut start = self.page.saturating_sub(half).max(1);
        let end = (start + window - 1).min(total_pages);
        start = start.min(end + 1 - window);

        let mut controls = vec![PageControl::Prev { enabled: self.page > 1 }];
        if start > 1 {
            controls.push(self.page_button(1));
            if start > 2 {
                controls.push(PageControl::Ellipsis);
            }
        }
        controls.extend((start..=end).map(|n| self.page_button(n)));
        if end < total_pages {
            if end < total_pages - 1 {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(self.page_button(total_pages));
        }
        controls.push(PageControl::Next { enabled: self.page < total_pages });
        controls
    }

    /// "Showing 9-16 of 20"
    pub fn summary(&self) -> String {
        let range = self.slice_range();
        if range.is_empty() {
            return "No entries".to_string();
        }
        format!("Showing {}-{} of {}", range.start + 1, range.end, self.total)
    }

    fn page_button(&self, number: usize) -> PageControl {
        PageControl::Page { number, active: number == self.page }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager_with(total: usize) -> Pager {
        let mut pager = Pager::new(8);
        pager.set_total(total);
        pager
    }

    fn page_numbers(controls: &[PageControl]) -> Vec<Option<usize>> {
        controls.iter()
            .filter_map(|c| match c {
                PageControl::Page { number, .. } => Some(Some(*number)),
                PageControl::Ellipsis => Some(None),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_total_pages_and_slice_lengths() {
        for len in 0..=40usize {
            let items: Vec<usize> = (0..len).collect();
            let mut pager = pager_with(len);
            assert_eq!(pager.total_pages(), (len + 7) / 8, "len {}", len);
            for page in 1..=pager.total_pages() {
                pager.go_to(page);
                assert_eq!(pager.page(), page);
                let visible = pager.visible(&items);
                assert_eq!(visible.len(), 8.min(len - (page - 1) * 8));
                assert_eq!(visible.first(), Some(&((page - 1) * 8)));
            }
        }
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut pager = pager_with(20);
        assert!(!pager.go_to(0));
        assert!(!pager.go_to(4));
        assert_eq!(pager.page(), 1);
        assert!(pager.go_to(3));
        assert!(!pager.next());
        assert_eq!(pager.page(), 3);

        let mut empty = pager_with(0);
        assert!(!empty.go_to(1));
        assert!(!empty.prev());
        assert_eq!(empty.page(), 1);
        assert!(empty.visible::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_set_total_clamps_cursor() {
        let mut pager = pager_with(40);
        pager.go_to(5);
        pager.set_total(17);
        assert_eq!(pager.page(), 3);
        pager.set_total(0);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_controls_empty_list() {
        assert!(pager_with(0).controls(PAGE_WINDOW).is_empty());
    }

    #[test]
    fn test_controls_boundaries_and_highlight() {
        let mut pager = pager_with(20);
        let controls = pager.controls(PAGE_WINDOW);
        assert_eq!(controls.first(), Some(&PageControl::Prev { enabled: false }));
        assert_eq!(controls.last(), Some(&PageControl::Next { enabled: true }));
        assert!(controls.contains(&PageControl::Page { number: 1, active: true }));
        assert_eq!(page_numbers(&controls), vec![Some(1), Some(2), Some(3)]);

        pager.go_to(3);
        let controls = pager.controls(PAGE_WINDOW);
        assert_eq!(controls.first(), Some(&PageControl::Prev { enabled: true }));
        assert_eq!(controls.last(), Some(&PageControl::Next { enabled: false }));
        assert!(controls.contains(&PageControl::Page { number: 3, active: true }));
    }

    #[test]
    fn test_controls_window_with_ellipses() {
        let mut pager = pager_with(8 * 20);
        assert_eq!(
            page_numbers(&pager.controls(5)),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(20)]
        );

        pager.go_to(10);
        assert_eq!(
            page_numbers(&pager.controls(5)),
            vec![Some(1), None, Some(8), Some(9), Some(10), Some(11), Some(12), None, Some(20)]
        );

        pager.go_to(20);
        assert_eq!(
            page_numbers(&pager.controls(5)),
            vec![Some(1), None, Some(16), Some(17), Some(18), Some(19), Some(20)]
        );

        // No ellipsis when the gap is a single page
        pager.go_to(4);
        assert_eq!(
            page_numbers(&pager.controls(5)),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), None, Some(20)]
        );
    }

    #[test]
    fn test_summary() {
        let mut pager = pager_with(20);
        assert_eq!(pager.summary(), "Showing 1-8 of 20");
        pager.go_to(3);
        assert_eq!(pager.summary(), "Showing 17-20 of 20");
        assert_eq!(pager_with(0).summary(), "No entries");
    }
}
