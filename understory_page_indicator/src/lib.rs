// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_page_indicator --heading-base-level=0

//! Understory Page Indicator: a row of dots mirroring a paged container.
//!
//! A page indicator shows one dot per page of a carousel, onboarding flow, or
//! other swipeable container, with the current page's dot filled and the
//! others outlined. This crate provides the widget logic without tying it to
//! a particular UI framework:
//!
//! - [`IndicatorConfig`]: construction-time options (page count, radius,
//!   padding, stroke width, colors, minimum size) with documented defaults.
//! - [`IndicatorStyle`]: the resolved dot geometry and colors, plus the layout
//!   arithmetic for dot positions and the preferred widget size.
//! - [`PageState`]: page count and selected page.
//! - [`PageIndicator`]: the widget. It measures itself against
//!   [`MeasureSpec`] constraints, renders onto any [`IndicatorSurface`], and
//!   [binds](PageIndicator::bind) to any [`PagedContainer`].
//! - [`RecordingSurface`]: an [`IndicatorSurface`] that records draw commands
//!   for tests and debugging.
//!
//! Host frameworks are responsible for:
//!
//! - Calling [`PageIndicator::measure`] during layout and
//!   [`PageIndicator::render`] during paint, translating the circle primitives
//!   to their renderer.
//! - Scheduling a repaint when the widget asks for one, via
//!   [`PageIndicator::set_redraw_handler`] or by polling
//!   [`PageIndicator::needs_redraw`].
//!
//! ## Layout
//!
//! All geometry is in integer device pixels, with `size = 2 * radius`. Dot `i`
//! occupies a `size × size` box whose left edge is
//! `i * (size + padding + stroke / 2) + stroke / 2` and whose top edge is
//! `stroke / 2`, using truncating division. Under "at most" constraints on both
//! axes the widget asks for
//! `count * (size + stroke) + (count - 1) * padding` by `size + stroke`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_page_indicator::{
//!     IndicatorConfig, MeasureSpec, MeasuredSize, PageIndicator, RecordingSurface,
//! };
//! use understory_pager::{Collection, Pager};
//!
//! let config = IndicatorConfig::new()
//!     .with_indicator_radius(10)
//!     .with_stroke_width(2)
//!     .with_indicator_padding(5);
//! let indicator = PageIndicator::new(&config);
//!
//! let pager = Pager::with_collection(Collection::new(3));
//! let binding = indicator.bind(&pager);
//!
//! let size = indicator.measure(MeasureSpec::AtMost(320), MeasureSpec::AtMost(48));
//! assert_eq!(size, MeasuredSize::new(76, 22));
//!
//! pager.set_current(1);
//! assert!(indicator.needs_redraw());
//!
//! let mut surface = RecordingSurface::new();
//! indicator.render(&mut surface);
//! assert!(surface.commands()[1].is_fill());
//!
//! binding.unbind();
//! ```
//!
//! The `visible_indicator_count` option is stored but not used for layout or
//! drawing; a negative value is replaced by the dot diameter.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod indicator;
mod measure;
mod state;
mod style;
mod surface;

pub use indicator::{Binding, PageIndicator};
pub use measure::{MeasureSpec, MeasuredSize};
pub use state::PageState;
pub use style::{
    DEFAULT_ACTIVE_COLOR, DEFAULT_INACTIVE_COLOR, DEFAULT_INDICATOR_PADDING,
    DEFAULT_INDICATOR_RADIUS, DEFAULT_STROKE_WIDTH, DEFAULT_VISIBLE_INDICATORS, IndicatorConfig,
    IndicatorStyle,
};
pub use surface::{DotCommand, IndicatorSurface, RecordingSurface};

pub use understory_pager::PagedContainer;
