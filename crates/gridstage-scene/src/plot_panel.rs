#![forbid(unsafe_code)]

//! Per-artifact plot panel state.
//!
//! Holds which plot is focused, whether the grid-expansion view is on,
//! and the current page. Focus and expansion are independent: select
//! calls while expanded do not move the collapsed focus. Page capacity
//! differs between the single-focus strip (how many slots fit the
//! strip width) and the expanded 2×2 grid, so toggling expansion
//! resets the page to 0 rather than risking an out-of-range page under
//! the new capacity.

/// Fixed page capacity of the expanded 2×2 grid view.
pub const EXPANDED_PAGE_CAPACITY: usize = 4;

/// World-unit width one item slot occupies in the collapsed strip.
pub const STRIP_SLOT_WIDTH: f32 = 1.6;

/// Plot panel state for one artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotPanel {
    focused: usize,
    expanded: bool,
    page: usize,
}

impl PlotPanel {
    /// Fresh panel: focus 0, collapsed, page 0. Created when plots
    /// first arrive, which is the only implicit focus reset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the plot focused in the collapsed view.
    #[must_use]
    pub const fn focused(&self) -> usize {
        self.focused
    }

    #[must_use]
    pub const fn expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Slots per page in the collapsed strip for the given width.
    /// Never zero.
    #[must_use]
    pub fn collapsed_capacity(strip_width: f32) -> usize {
        ((strip_width / STRIP_SLOT_WIDTH).floor() as usize).max(1)
    }

    /// Items per page under the current view.
    #[must_use]
    pub fn capacity(&self, strip_width: f32) -> usize {
        if self.expanded {
            EXPANDED_PAGE_CAPACITY
        } else {
            Self::collapsed_capacity(strip_width)
        }
    }

    /// Number of pages for `total` plots under the current view.
    /// At least 1, even when empty.
    #[must_use]
    pub fn page_count(&self, total: usize, strip_width: f32) -> usize {
        let capacity = self.capacity(strip_width);
        total.div_ceil(capacity).max(1)
    }

    /// Toggle the expanded grid view. Resets the page so the new
    /// capacity cannot leave the panel on a page that no longer
    /// exists.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        self.page = 0;
    }

    /// Focus a plot for the collapsed view. Ignored while expanded;
    /// expansion and focus are independent state. The index clamps to
    /// the last plot.
    ///
    /// Returns true when the focus moved.
    pub fn select(&mut self, index: usize, total: usize) -> bool {
        if self.expanded || total == 0 {
            return false;
        }
        let next = index.min(total - 1);
        if next == self.focused {
            return false;
        }
        self.focused = next;
        true
    }

    /// Advance one page, clamped to the last page.
    pub fn next_page(&mut self, total: usize, strip_width: f32) -> bool {
        let last = self.page_count(total, strip_width) - 1;
        if self.page >= last {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page.
    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// The index range of plots visible on the current page, clamped
    /// to `total`.
    #[must_use]
    pub fn visible_range(&self, total: usize, strip_width: f32) -> std::ops::Range<usize> {
        let capacity = self.capacity(strip_width);
        let start = (self.page * capacity).min(total);
        let end = (start + capacity).min(total);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_capacity_fits_strip() {
        assert_eq!(PlotPanel::collapsed_capacity(5.0), 3);
        assert_eq!(PlotPanel::collapsed_capacity(1.6), 1);
    }

    #[test]
    fn collapsed_capacity_never_zero() {
        assert_eq!(PlotPanel::collapsed_capacity(0.0), 1);
        assert_eq!(PlotPanel::collapsed_capacity(-3.0), 1);
    }

    #[test]
    fn toggle_expansion_resets_page() {
        let mut panel = PlotPanel::new();
        // 9 plots, strip fits 3 per page: land on page 2 of 3.
        assert!(panel.next_page(9, 5.0));
        assert!(panel.next_page(9, 5.0));
        assert_eq!(panel.page(), 2);

        panel.toggle_expanded();
        assert!(panel.expanded());
        assert_eq!(panel.page(), 0);
        // Expanded capacity 4: 9 plots make 3 pages again.
        assert_eq!(panel.page_count(9, 5.0), 3);
    }

    #[test]
    fn select_while_expanded_keeps_focus() {
        let mut panel = PlotPanel::new();
        assert!(panel.select(2, 5));
        panel.toggle_expanded();
        assert!(!panel.select(4, 5));
        assert_eq!(panel.focused(), 2);
    }

    #[test]
    fn select_clamps_to_last() {
        let mut panel = PlotPanel::new();
        assert!(panel.select(99, 3));
        assert_eq!(panel.focused(), 2);
    }

    #[test]
    fn select_with_no_plots_is_noop() {
        let mut panel = PlotPanel::new();
        assert!(!panel.select(0, 0));
        assert_eq!(panel.focused(), 0);
    }

    #[test]
    fn page_navigation_clamps() {
        let mut panel = PlotPanel::new();
        assert!(!panel.prev_page());
        // 4 plots, capacity 3: two pages.
        assert!(panel.next_page(4, 5.0));
        assert!(!panel.next_page(4, 5.0));
        assert_eq!(panel.page(), 1);
        assert!(panel.prev_page());
        assert_eq!(panel.page(), 0);
    }

    #[test]
    fn page_count_of_empty_is_one() {
        let panel = PlotPanel::new();
        assert_eq!(panel.page_count(0, 5.0), 1);
    }

    #[test]
    fn visible_range_follows_page() {
        let mut panel = PlotPanel::new();
        assert_eq!(panel.visible_range(7, 5.0), 0..3);
        panel.next_page(7, 5.0);
        assert_eq!(panel.visible_range(7, 5.0), 3..6);
        panel.next_page(7, 5.0);
        assert_eq!(panel.visible_range(7, 5.0), 6..7);
    }

    #[test]
    fn visible_range_expanded_uses_fixed_capacity() {
        let mut panel = PlotPanel::new();
        panel.toggle_expanded();
        assert_eq!(panel.visible_range(7, 5.0), 0..4);
        panel.next_page(7, 5.0);
        assert_eq!(panel.visible_range(7, 5.0), 4..7);
    }
}
