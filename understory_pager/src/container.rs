// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paged-container contract.

use crate::event::{Collection, CollectionReplaced, PagerEvent};
use crate::subscription::{Listener, Subscription};

/// A swipeable container that presents one page of a collection at a time.
///
/// Consumers such as page indicators read the current [`Collection`] and
/// subscribe to changes. Every subscription returns a [`Subscription`] that
/// must be used to detach; implementations must not de-duplicate listeners.
///
/// Listeners run on the thread that drives the container, synchronously,
/// while the container is updating its state.
pub trait PagedContainer {
    /// The collection currently presented, if any.
    fn collection(&self) -> Option<Collection>;

    /// Subscribe to selection, scroll progress and scroll-state changes.
    fn subscribe_page_change(&self, listener: Listener<PagerEvent>) -> Subscription;

    /// Subscribe to the container swapping its collection.
    fn subscribe_collection_replaced(
        &self,
        listener: Listener<CollectionReplaced>,
    ) -> Subscription;
}

impl<T: PagedContainer + ?Sized> PagedContainer for &T {
    fn collection(&self) -> Option<Collection> {
        (**self).collection()
    }

    fn subscribe_page_change(&self, listener: Listener<PagerEvent>) -> Subscription {
        (**self).subscribe_page_change(listener)
    }

    fn subscribe_collection_replaced(
        &self,
        listener: Listener<CollectionReplaced>,
    ) -> Subscription {
        (**self).subscribe_collection_replaced(listener)
    }
}

impl<T: PagedContainer + ?Sized> PagedContainer for alloc::rc::Rc<T> {
    fn collection(&self) -> Option<Collection> {
        (**self).collection()
    }

    fn subscribe_page_change(&self, listener: Listener<PagerEvent>) -> Subscription {
        (**self).subscribe_page_change(listener)
    }

    fn subscribe_collection_replaced(
        &self,
        listener: Listener<CollectionReplaced>,
    ) -> Subscription {
        (**self).subscribe_collection_replaced(listener)
    }
}
