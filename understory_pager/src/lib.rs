// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pager --heading-base-level=0

//! Understory Pager: the paged-container contract.
//!
//! A paged container (carousel, onboarding flow, tabbed pager) shows one page
//! of a collection at a time and lets the user swipe between pages. This crate
//! describes what such a container exposes to its observers, without knowing
//! anything about how pages are laid out or scrolled:
//!
//! - [`PagedContainer`]: the trait observers bind to. It exposes the current
//!   [`Collection`] (which may be absent) and two subscribable event streams.
//! - [`PagerEvent`]: a tagged union of page selection, scroll progress, and
//!   [`ScrollState`] changes.
//! - [`CollectionReplaced`]: emitted when the container swaps its collection.
//! - [`Subscription`]: the explicit disposer returned by every subscription.
//!   Dropping it keeps the listener attached; call
//!   [`Subscription::unsubscribe`] to detach.
//! - [`Pager`]: a small in-memory container that hosts drive from their own
//!   gesture and animation code, and that tests use as a stand-in.
//!
//! Everything here is single-threaded. Listeners are plain `FnMut` closures
//! invoked synchronously while the container updates its state.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_pager::{Collection, PagedContainer, Pager, PagerEvent};
//!
//! let pager = Pager::with_collection(Collection::new(4));
//! let selected = Rc::new(Cell::new(0));
//!
//! let sink = selected.clone();
//! let sub = pager.subscribe_page_change(Box::new(move |ev: &PagerEvent| {
//!     if let PagerEvent::Selected { index } = *ev {
//!         sink.set(index);
//!     }
//! }));
//!
//! pager.set_current(3);
//! assert_eq!(selected.get(), 3);
//!
//! // Detach explicitly; later changes are no longer observed.
//! assert!(sub.unsubscribe());
//! pager.set_current(1);
//! assert_eq!(selected.get(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod container;
mod event;
mod pager;
mod subscription;

pub use container::PagedContainer;
pub use event::{Collection, CollectionReplaced, PagerEvent, ScrollState};
pub use pager::Pager;
pub use subscription::{Listener, ListenerId, Listeners, Subscription};
