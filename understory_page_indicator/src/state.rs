// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page count and selection mirrored from a paged container.

/// How many pages exist and which one is selected.
///
/// The selected index is stored as reported by the container and is not
/// clamped on write; [`PageState::active_index`] clamps it into range when a
/// dot has to be chosen. With no pages the selection has no meaning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PageState {
    page_count: usize,
    selected_index: usize,
}

impl PageState {
    /// State with `page_count` pages and the first page selected.
    #[inline]
    #[must_use]
    pub const fn new(page_count: usize) -> Self {
        Self {
            page_count,
            selected_index: 0,
        }
    }

    /// Number of pages (and dots).
    #[inline]
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Selected page index as last reported.
    #[inline]
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Index of the dot drawn as active, or `None` when there are no pages.
    #[inline]
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        if self.page_count == 0 {
            None
        } else if self.selected_index < self.page_count {
            Some(self.selected_index)
        } else {
            Some(self.page_count - 1)
        }
    }

    /// Returns a copy with a different page count; the selection is kept.
    #[inline]
    #[must_use]
    pub const fn with_page_count(self, page_count: usize) -> Self {
        Self { page_count, ..self }
    }

    /// Returns a copy with a different selected index.
    #[inline]
    #[must_use]
    pub const fn with_selected_index(self, selected_index: usize) -> Self {
        Self {
            selected_index,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_has_no_active_dot() {
        let s = PageState::default();
        assert_eq!(s.page_count(), 0);
        assert_eq!(s.active_index(), None);
        assert_eq!(s.with_selected_index(3).active_index(), None);
    }

    #[test]
    fn out_of_range_selection_is_clamped_for_drawing_only() {
        let s = PageState::new(3).with_selected_index(7);
        assert_eq!(s.selected_index(), 7);
        assert_eq!(s.active_index(), Some(2));
    }

    #[test]
    fn changing_page_count_keeps_selection() {
        let s = PageState::new(5).with_selected_index(4).with_page_count(2);
        assert_eq!(s.selected_index(), 4);
        assert_eq!(s.active_index(), Some(1));
        assert_eq!(s.with_page_count(6).active_index(), Some(4));
    }
}
