// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads emitted by a paged container.

/// The set of pages a container is currently presenting.
///
/// Only the item count is exposed; the items themselves stay with the host.
/// A container without a collection reports `None` wherever an
/// `Option<Collection>` is expected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Collection {
    count: usize,
}

impl Collection {
    /// Create a collection with `count` pages.
    #[inline]
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count }
    }

    /// Number of pages in the collection.
    #[inline]
    #[must_use]
    pub const fn count(self) -> usize {
        self.count
    }

    /// Returns `true` if the collection has no pages.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.count == 0
    }
}

/// Coarse scrolling phase of a paged container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollState {
    /// The container is at rest on a page.
    #[default]
    Idle,
    /// The user is actively dragging between pages.
    Dragging,
    /// The container is animating towards its final page.
    Settling,
}

/// Page-change notification delivered to page-change listeners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PagerEvent {
    /// A new page became the current page.
    Selected {
        /// Index of the newly selected page.
        index: usize,
    },
    /// The container scrolled, either by a drag or while settling.
    Scrolled {
        /// Index of the page currently at the leading edge.
        position: usize,
        /// Fraction `[0, 1)` of the next page that is visible.
        offset_fraction: f32,
        /// The same offset in device pixels.
        offset_pixels: i32,
    },
    /// The coarse scroll phase changed.
    ScrollStateChanged(ScrollState),
}

/// Notification that a container swapped its collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollectionReplaced {
    /// The collection that was presented before the change.
    pub old: Option<Collection>,
    /// The collection presented from now on.
    pub new: Option<Collection>,
}

impl CollectionReplaced {
    /// Page count after the change, treating an absent collection as empty.
    #[inline]
    #[must_use]
    pub fn new_count(&self) -> usize {
        self.new.map_or(0, Collection::count)
    }
}
