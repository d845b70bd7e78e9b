// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registries and the [`Subscription`] handles they hand out.
//!
//! A [`Listeners`] list owns boxed callbacks for one event type. Registering a
//! callback returns a [`Subscription`], which is the only way to remove it
//! again. Dropping a `Subscription` leaves the callback attached; call
//! [`Subscription::unsubscribe`] to detach.
//!
//! Dispatch snapshots the current callbacks before invoking them, so a
//! callback may subscribe or unsubscribe (itself or others) while an event is
//! being delivered. Such changes take effect from the next event on.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_pager::Listeners;
//!
//! let listeners = Listeners::<u32>::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = seen.clone();
//! let sub = listeners.subscribe(Box::new(move |v: &u32| sink.set(sink.get() + *v)));
//!
//! listeners.emit(&2);
//! listeners.emit(&3);
//! assert_eq!(seen.get(), 5);
//!
//! sub.unsubscribe();
//! listeners.emit(&10);
//! assert_eq!(seen.get(), 5);
//! ```

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// Boxed callback stored by a [`Listeners`] list.
pub type Listener<E> = Box<dyn FnMut(&E)>;

type SharedListener<E> = Rc<RefCell<Listener<E>>>;

/// Identifier of one registered callback, unique within its [`Listeners`] list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Slots<E> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, SharedListener<E>)>>,
}

/// Type-erased view of a listener list, used by [`Subscription`] to detach.
trait Detach {
    fn detach(&self, id: ListenerId) -> bool;
    fn contains(&self, id: ListenerId) -> bool;
}

impl<E> Detach for Slots<E> {
    fn detach(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry, _)| *entry != id);
        entries.len() != before
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.entries.borrow().iter().any(|(entry, _)| *entry == id)
    }
}

/// An ordered list of callbacks for events of type `E`.
///
/// Callbacks run in subscription order. The list is single-threaded and
/// relies on interior mutability, so every operation takes `&self`.
pub struct Listeners<E> {
    slots: Rc<Slots<E>>,
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .field("next_id", &self.slots.next_id.get())
            .finish_non_exhaustive()
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            slots: Rc::new(Slots {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }
}

impl<E: 'static> Listeners<E> {
    /// Create an empty listener list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` and return the handle that detaches it.
    ///
    /// Registering the same logical callback twice yields two independent
    /// subscriptions; there is no de-duplication.
    pub fn subscribe(&self, listener: Listener<E>) -> Subscription {
        let id = ListenerId(self.slots.next_id.get());
        self.slots.next_id.set(id.0.wrapping_add(1));
        self.slots
            .entries
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        let registry = Rc::downgrade(&self.slots);
        let registry: Weak<dyn Detach> = registry;
        Subscription { id, registry }
    }

    /// Deliver `event` to every callback registered at the time of the call.
    ///
    /// A callback that is already running (because it re-entrantly caused the
    /// same list to emit) is skipped for the nested event.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<SharedListener<E>> = self
            .slots
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            match listener.try_borrow_mut() {
                Ok(mut callback) => (callback)(event),
                Err(_) => log::warn!("skipping re-entrant listener invocation"),
            }
        }
    }
}

impl<E> Listeners<E> {
    /// Number of attached callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.entries.borrow().len()
    }

    /// Returns `true` if no callbacks are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to one registered callback.
///
/// Call [`Subscription::unsubscribe`] to detach the callback. Dropping the
/// handle does not detach it.
pub struct Subscription {
    id: ListenerId,
    registry: Weak<dyn Detach>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl Subscription {
    /// Identifier of the callback this handle refers to.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns `true` while the callback is still attached to a live list.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }

    /// Detach the callback.
    ///
    /// Returns `true` if the callback was attached. Detaching from a list that
    /// has already been dropped is a no-op.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.detach(self.id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn callbacks_run_in_subscription_order() {
        let list = Listeners::<u8>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = log.clone();
        let _sa = list.subscribe(Box::new(move |v: &u8| a.borrow_mut().push(('a', *v))));
        let b = log.clone();
        let _sb = list.subscribe(Box::new(move |v: &u8| b.borrow_mut().push(('b', *v))));

        list.emit(&1);
        assert_eq!(*log.borrow(), vec![('a', 1), ('b', 1)]);
    }

    #[test]
    fn duplicate_subscriptions_are_independent() {
        let list = Listeners::<()>::new();
        let hits = Rc::new(Cell::new(0_u32));

        let h1 = hits.clone();
        let first = list.subscribe(Box::new(move |_: &()| h1.set(h1.get() + 1)));
        let h2 = hits.clone();
        let second = list.subscribe(Box::new(move |_: &()| h2.set(h2.get() + 1)));
        assert_ne!(first.id(), second.id());

        list.emit(&());
        assert_eq!(hits.get(), 2);

        assert!(first.unsubscribe());
        list.emit(&());
        assert_eq!(hits.get(), 3);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn dropping_handle_keeps_callback_attached() {
        let list = Listeners::<()>::new();
        let hits = Rc::new(Cell::new(0_u32));
        let h = hits.clone();
        drop(list.subscribe(Box::new(move |_: &()| h.set(h.get() + 1))));

        list.emit(&());
        assert_eq!(hits.get(), 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn unsubscribe_during_dispatch_applies_to_next_event() {
        let list = Listeners::<()>::new();
        let hits = Rc::new(Cell::new(0_u32));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let h = hits.clone();
        let own = slot.clone();
        let sub = list.subscribe(Box::new(move |_: &()| {
            h.set(h.get() + 1);
            if let Some(sub) = own.borrow_mut().take() {
                sub.unsubscribe();
            }
        }));
        *slot.borrow_mut() = Some(sub);

        list.emit(&());
        list.emit(&());
        assert_eq!(hits.get(), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn subscription_is_inactive_after_unsubscribe_or_list_dropped() {
        let list = Listeners::<()>::new();
        let sub = list.subscribe(Box::new(|_: &()| {}));
        let other = list.subscribe(Box::new(|_: &()| {}));
        assert!(sub.is_active());
        assert!(other.unsubscribe());
        assert!(sub.is_active());
        assert_eq!(list.len(), 1);

        let list = Listeners::<()>::new();
        let sub = list.subscribe(Box::new(|_: &()| {}));
        drop(list);
        assert!(!sub.is_active());
        assert!(!sub.unsubscribe());
    }
}
