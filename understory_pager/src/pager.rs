// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small in-memory paged container.
//!
//! [`Pager`] keeps the state a swipeable container reports to the outside
//! world (current page, scroll phase, collection) and fires the matching
//! events when the host updates it. It does not scroll anything itself: hosts
//! translate their gesture and animation callbacks into calls on the pager.

use core::cell::Cell;

use crate::container::PagedContainer;
use crate::event::{Collection, CollectionReplaced, PagerEvent, ScrollState};
use crate::subscription::{Listener, Listeners, Subscription};

/// In-memory [`PagedContainer`] driven by the host.
///
/// All methods take `&self`, so listeners may query or drive the pager while
/// an event is being delivered.
///
/// ## Minimal example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use understory_pager::{Collection, PagedContainer, Pager, PagerEvent};
///
/// let pager = Pager::with_collection(Collection::new(3));
/// let last = Rc::new(Cell::new(None));
///
/// let sink = last.clone();
/// let _sub = pager.subscribe_page_change(Box::new(move |ev: &PagerEvent| {
///     if let PagerEvent::Selected { index } = *ev {
///         sink.set(Some(index));
///     }
/// }));
///
/// pager.set_current(2);
/// assert_eq!(last.get(), Some(2));
///
/// // Out-of-range requests clamp to the last page; no change, no event.
/// last.set(None);
/// pager.set_current(10);
/// assert_eq!(pager.current(), 2);
/// assert_eq!(last.get(), None);
/// ```
#[derive(Debug, Default)]
pub struct Pager {
    collection: Cell<Option<Collection>>,
    current: Cell<usize>,
    scroll_state: Cell<ScrollState>,
    page_change: Listeners<PagerEvent>,
    collection_replaced: Listeners<CollectionReplaced>,
}

impl Pager {
    /// Create a pager without a collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pager presenting `collection`, positioned on the first page.
    #[must_use]
    pub fn with_collection(collection: Collection) -> Self {
        let pager = Self::default();
        pager.collection.set(Some(collection));
        pager
    }

    /// Index of the current page.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current.get()
    }

    /// Current coarse scroll phase.
    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state.get()
    }

    /// Total number of attached listeners across both event kinds.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.page_change.len() + self.collection_replaced.len()
    }

    /// Make `index` the current page.
    ///
    /// The index is clamped to the collection's range; without a collection,
    /// or with an empty one, the request is ignored. Emits
    /// [`PagerEvent::Selected`] only when the current page actually changes.
    pub fn set_current(&self, index: usize) {
        let Some(count) = self.collection.get().map(Collection::count) else {
            log::debug!("set_current({index}) ignored: no collection");
            return;
        };
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        if index == self.current.get() {
            return;
        }
        self.current.set(index);
        log::trace!("pager selected page {index}");
        self.page_change.emit(&PagerEvent::Selected { index });
    }

    /// Report scroll progress from the host's gesture or animation.
    ///
    /// This is always forwarded as [`PagerEvent::Scrolled`]; the pager does
    /// not interpret it.
    pub fn report_scroll(&self, position: usize, offset_fraction: f32, offset_pixels: i32) {
        self.page_change.emit(&PagerEvent::Scrolled {
            position,
            offset_fraction,
            offset_pixels,
        });
    }

    /// Update the coarse scroll phase, emitting an event if it changed.
    pub fn set_scroll_state(&self, state: ScrollState) {
        if self.scroll_state.replace(state) != state {
            self.page_change
                .emit(&PagerEvent::ScrollStateChanged(state));
        }
    }

    /// Replace the presented collection.
    ///
    /// Collection-replaced listeners are notified first. Afterwards the
    /// current page is clamped into the new range; if that moves it, a
    /// [`PagerEvent::Selected`] follows.
    pub fn set_collection(&self, collection: Option<Collection>) {
        let old = self.collection.replace(collection);
        log::debug!(
            "pager collection replaced: {:?} -> {:?}",
            old.map(Collection::count),
            collection.map(Collection::count)
        );
        self.collection_replaced.emit(&CollectionReplaced {
            old,
            new: collection,
        });

        let count = collection.map_or(0, Collection::count);
        let clamped = self.current.get().min(count.saturating_sub(1));
        if clamped != self.current.get() {
            self.current.set(clamped);
            self.page_change
                .emit(&PagerEvent::Selected { index: clamped });
        }
    }
}

impl PagedContainer for Pager {
    fn collection(&self) -> Option<Collection> {
        self.collection.get()
    }

    fn subscribe_page_change(&self, listener: Listener<PagerEvent>) -> Subscription {
        self.page_change.subscribe(listener)
    }

    fn subscribe_collection_replaced(
        &self,
        listener: Listener<CollectionReplaced>,
    ) -> Subscription {
        self.collection_replaced.subscribe(listener)
    }
}
