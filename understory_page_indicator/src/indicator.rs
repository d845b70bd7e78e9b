// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page indicator widget and its container binding.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use understory_pager::{CollectionReplaced, PagedContainer, PagerEvent, Subscription};

use crate::measure::{MeasureSpec, MeasuredSize};
use crate::state::PageState;
use crate::style::{IndicatorConfig, IndicatorStyle};
use crate::surface::IndicatorSurface;

type RedrawHandler = Box<dyn FnMut()>;

/// State shared between the widget and the callbacks it registers.
struct Shared {
    pages: Cell<PageState>,
    pending: Cell<bool>,
    requests: Cell<u64>,
    bindings: Cell<usize>,
    on_redraw: RefCell<Option<RedrawHandler>>,
    /// Bumped whenever the handler is installed or removed.
    handler_generation: Cell<u64>,
    in_handler: Cell<bool>,
    deferred: Cell<bool>,
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("pages", &self.pages.get())
            .field("pending", &self.pending.get())
            .field("requests", &self.requests.get())
            .field("bindings", &self.bindings.get())
            .field(
                "on_redraw",
                &self.on_redraw.try_borrow().map(|h| h.is_some()).ok(),
            )
            .field("handler_generation", &self.handler_generation.get())
            .field("in_handler", &self.in_handler.get())
            .field("deferred", &self.deferred.get())
            .finish()
    }
}

impl Shared {
    fn update(&self, f: impl FnOnce(PageState) -> PageState) {
        self.pages.set(f(self.pages.get()));
    }

    fn replace_handler(&self, handler: Option<RedrawHandler>) {
        self.handler_generation
            .set(self.handler_generation.get().wrapping_add(1));
        *self.on_redraw.borrow_mut() = handler;
    }

    fn request_redraw(&self) {
        self.requests.set(self.requests.get().wrapping_add(1));
        self.pending.set(true);
        if self.in_handler.get() {
            self.deferred.set(true);
            return;
        }
        // The handler is taken out while it runs so it may re-enter the widget.
        let Some(mut handler) = self.on_redraw.borrow_mut().take() else {
            return;
        };
        let generation = self.handler_generation.get();
        self.in_handler.set(true);
        handler();
        // Requests made by the handler itself are delivered in one follow-up call.
        if self.deferred.replace(false) && self.handler_generation.get() == generation {
            handler();
        }
        self.deferred.set(false);
        self.in_handler.set(false);
        // Installing or clearing a handler from inside the handler wins.
        if self.handler_generation.get() == generation {
            *self.on_redraw.borrow_mut() = Some(handler);
        }
    }

    fn on_page_event(&self, event: &PagerEvent) {
        match *event {
            PagerEvent::Selected { index } => {
                log::trace!("indicator selected page {index}");
                self.update(|pages| pages.with_selected_index(index));
                self.request_redraw();
            }
            // Reserved for continuous drag feedback.
            PagerEvent::Scrolled { .. } | PagerEvent::ScrollStateChanged(_) => {}
        }
    }

    fn on_collection_replaced(&self, event: &CollectionReplaced) {
        let count = event.new_count();
        log::debug!("indicator collection replaced, {count} pages");
        self.update(|pages| pages.with_page_count(count));
        self.request_redraw();
    }
}

/// A horizontal row of dots mirroring the current page of a paged container.
///
/// The widget owns its [`IndicatorStyle`] and a [`PageState`]. Hosts call
/// [`measure`](Self::measure) from their layout pass and
/// [`render`](Self::render) from their paint pass, and connect the widget to
/// a container with [`bind`](Self::bind). State changes coming from the
/// container are followed by a redraw request, which is forwarded to the
/// handler installed with [`set_redraw_handler`](Self::set_redraw_handler).
/// The widget never schedules redraws itself; requests made from inside the
/// handler are folded into one follow-up call.
///
/// ```rust
/// use understory_page_indicator::{IndicatorConfig, PageIndicator, RecordingSurface};
/// use understory_pager::{Collection, Pager};
///
/// let indicator = PageIndicator::new(&IndicatorConfig::new());
/// let pager = Pager::with_collection(Collection::new(4));
/// let _binding = indicator.bind(&pager);
///
/// pager.set_current(2);
/// assert_eq!(indicator.page_state().selected_index(), 2);
///
/// let mut surface = RecordingSurface::new();
/// indicator.render(&mut surface);
/// assert_eq!(surface.fill_count(), 1);
/// assert_eq!(surface.stroke_count(), 3);
/// ```
#[derive(Debug)]
pub struct PageIndicator {
    style: IndicatorStyle,
    minimum_size: MeasuredSize,
    shared: Rc<Shared>,
}

impl Default for PageIndicator {
    fn default() -> Self {
        Self::new(&IndicatorConfig::default())
    }
}

impl PageIndicator {
    /// Create an unbound indicator from `config`.
    #[must_use]
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            style: config.style(),
            minimum_size: config.minimum_size,
            shared: Rc::new(Shared {
                pages: Cell::new(config.page_state()),
                pending: Cell::new(false),
                requests: Cell::new(0),
                bindings: Cell::new(0),
                on_redraw: RefCell::new(None),
                handler_generation: Cell::new(0),
                in_handler: Cell::new(false),
                deferred: Cell::new(false),
            }),
        }
    }

    /// Current dot style.
    #[must_use]
    pub fn style(&self) -> &IndicatorStyle {
        &self.style
    }

    /// Replace the dot style and request a redraw.
    pub fn set_style(&mut self, style: IndicatorStyle) {
        self.style = style;
        self.shared.request_redraw();
    }

    /// Minimum size the host declared for the widget.
    #[must_use]
    pub fn minimum_size(&self) -> MeasuredSize {
        self.minimum_size
    }

    /// Update the host-declared minimum size.
    pub fn set_minimum_size(&mut self, minimum_size: MeasuredSize) {
        self.minimum_size = minimum_size;
    }

    /// Snapshot of the page count and selection.
    #[must_use]
    pub fn page_state(&self) -> PageState {
        self.shared.pages.get()
    }

    /// Set the number of dots and request a redraw.
    pub fn set_page_count(&self, page_count: usize) {
        self.shared.update(|pages| pages.with_page_count(page_count));
        self.shared.request_redraw();
    }

    /// Set the selected page and request a redraw.
    pub fn set_selected_index(&self, index: usize) {
        self.shared.update(|pages| pages.with_selected_index(index));
        self.shared.request_redraw();
    }

    /// Install the callback invoked on every redraw request.
    ///
    /// The callback runs synchronously, inside whatever operation requested
    /// the redraw. Replaces any previous handler, also when called from
    /// inside the running handler.
    ///
    /// Redraws requested while the handler runs are not delivered
    /// re-entrantly; they are folded into a single follow-up call once the
    /// handler returns. Requests made during that follow-up call only set
    /// [`needs_redraw`](Self::needs_redraw).
    pub fn set_redraw_handler(&self, handler: impl FnMut() + 'static) {
        self.shared.replace_handler(Some(Box::new(handler)));
    }

    /// Remove the redraw callback.
    ///
    /// Takes effect immediately, also when called from inside the handler.
    pub fn clear_redraw_handler(&self) {
        self.shared.replace_handler(None);
    }

    /// Returns `true` if a redraw was requested since the last [`render`](Self::render).
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.shared.pending.get()
    }

    /// Total number of redraw requests made by this widget.
    #[must_use]
    pub fn redraw_requests(&self) -> u64 {
        self.shared.requests.get()
    }

    /// Returns `true` while at least one [`Binding`] made by this widget has not been unbound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.shared.bindings.get() > 0
    }

    /// Compute the widget size for the given constraints.
    ///
    /// Only when both axes are [`MeasureSpec::AtMost`] does the widget size
    /// itself from its dots, taking the per-axis maximum with the minimum
    /// size. Any other combination falls back to host-default sizing.
    #[must_use]
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> MeasuredSize {
        if width.is_at_most() && height.is_at_most() {
            let count = clamp_to_i32(self.page_state().page_count());
            self.style.desired_size(count).max(self.minimum_size)
        } else {
            MeasuredSize::new(
                width.resolve_default(self.minimum_size.width),
                height.resolve_default(self.minimum_size.height),
            )
        }
    }

    /// Draw one dot per page onto `surface`.
    ///
    /// The active dot is filled with the active color; all others are
    /// outlined with the inactive color. Draws nothing when there are no
    /// pages. Clears the pending redraw flag.
    pub fn render<S: IndicatorSurface + ?Sized>(&self, surface: &mut S) {
        self.shared.pending.set(false);
        let pages = self.page_state();
        let Some(active) = pages.active_index() else {
            return;
        };
        let count = clamp_to_i32(pages.page_count());
        let active = clamp_to_i32(active);
        let stroke = f64::from(self.style.stroke_width());
        for i in 0..count {
            let circle = self.style.dot_circle(i);
            if i == active {
                surface.fill_circle(circle, self.style.active_color());
            } else {
                surface.stroke_circle(circle, self.style.inactive_color(), stroke);
            }
        }
    }

    /// Mirror `container` from now on.
    ///
    /// If the container currently has a collection, its page count is adopted
    /// and a redraw requested; otherwise the page count is left alone.
    /// Selection changes and collection replacements then update the widget,
    /// while scroll progress and scroll-state changes are ignored.
    ///
    /// Every call attaches new, independent subscriptions; binding the same
    /// container twice delivers each event twice. The returned [`Binding`]
    /// detaches them via [`Binding::unbind`]; dropping it does not.
    pub fn bind<C: PagedContainer + ?Sized>(&self, container: &C) -> Binding {
        if let Some(collection) = container.collection() {
            self.shared
                .update(|pages| pages.with_page_count(collection.count()));
            self.shared.request_redraw();
        }
        log::debug!(
            "binding indicator, {} pages",
            self.shared.pages.get().page_count()
        );

        let weak = Rc::downgrade(&self.shared);
        let page_change = container.subscribe_page_change(Box::new(move |event: &PagerEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.on_page_event(event);
            }
        }));
        let weak = Rc::downgrade(&self.shared);
        let collection_replaced =
            container.subscribe_collection_replaced(Box::new(move |event: &CollectionReplaced| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_collection_replaced(event);
                }
            }));

        self.shared
            .bindings
            .set(self.shared.bindings.get().saturating_add(1));
        Binding {
            page_change,
            collection_replaced,
            owner: Rc::downgrade(&self.shared),
        }
    }
}

/// The subscriptions created by one [`PageIndicator::bind`] call.
#[derive(Debug)]
#[must_use = "dropping a Binding keeps it attached; call `unbind` to detach"]
pub struct Binding {
    page_change: Subscription,
    collection_replaced: Subscription,
    owner: Weak<Shared>,
}

impl Binding {
    /// Returns `true` while either subscription is still attached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.page_change.is_active() || self.collection_replaced.is_active()
    }

    /// Detach from the container.
    ///
    /// Returns `true` if anything was still attached.
    pub fn unbind(self) -> bool {
        let page_change = self.page_change.unsubscribe();
        let collection_replaced = self.collection_replaced.unsubscribe();
        if let Some(owner) = self.owner.upgrade() {
            owner.bindings.set(owner.bindings.get().saturating_sub(1));
        }
        page_change || collection_replaced
    }
}

fn clamp_to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DotCommand, RecordingSurface};
    use kurbo::Point;
    use peniko::Color;
    use understory_pager::{Collection, Pager, ScrollState};

    fn geometry_config() -> IndicatorConfig {
        IndicatorConfig::new()
            .with_indicator_radius(10)
            .with_stroke_width(2)
            .with_indicator_padding(5)
    }

    #[test]
    fn renders_one_dot_per_page_with_single_active() {
        for count in 1..6 {
            let indicator = PageIndicator::new(&geometry_config().with_page_count(count));
            indicator.set_selected_index(count / 2);

            let mut surface = RecordingSurface::new();
            indicator.render(&mut surface);

            assert_eq!(surface.commands().len(), count);
            assert_eq!(surface.fill_count(), 1);
            assert_eq!(surface.stroke_count(), count - 1);
            assert!(surface.commands()[count / 2].is_fill());
        }
    }

    #[test]
    fn render_uses_style_colors_and_stroke() {
        let config = geometry_config()
            .with_page_count(2)
            .with_selected_color(Color::BLACK)
            .with_inactive_color(Color::WHITE);
        let indicator = PageIndicator::new(&config);

        let mut surface = RecordingSurface::new();
        indicator.render(&mut surface);

        let style = indicator.style();
        assert_eq!(
            surface.commands(),
            [
                DotCommand::Fill {
                    circle: style.dot_circle(0),
                    color: Color::BLACK,
                },
                DotCommand::Stroke {
                    circle: style.dot_circle(1),
                    color: Color::WHITE,
                    width: 2.0,
                },
            ]
        );
        assert_eq!(surface.commands()[0].circle().center, Point::new(11.0, 11.0));
        assert_eq!(surface.commands()[1].circle().center, Point::new(37.0, 11.0));
    }

    #[test]
    fn out_of_range_selection_highlights_last_dot() {
        let indicator = PageIndicator::new(&geometry_config().with_page_count(3));
        indicator.set_selected_index(9);

        let mut surface = RecordingSurface::new();
        indicator.render(&mut surface);
        assert_eq!(surface.fill_count(), 1);
        assert!(surface.commands()[2].is_fill());
    }

    #[test]
    fn render_without_pages_draws_nothing() {
        let indicator = PageIndicator::new(&geometry_config());
        let mut surface = RecordingSurface::new();
        indicator.render(&mut surface);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn render_clears_pending_redraw() {
        let indicator = PageIndicator::new(&geometry_config().with_page_count(2));
        indicator.set_selected_index(1);
        assert!(indicator.needs_redraw());
        indicator.render(&mut RecordingSurface::new());
        assert!(!indicator.needs_redraw());
    }

    #[test]
    fn measure_at_most_uses_dot_geometry() {
        let indicator = PageIndicator::new(&geometry_config().with_page_count(3));
        let size = indicator.measure(MeasureSpec::AtMost(500), MeasureSpec::AtMost(500));
        assert_eq!(size, MeasuredSize::new(76, 22));
    }

    #[test]
    fn measure_at_most_respects_minimum_size() {
        let config = geometry_config()
            .with_page_count(3)
            .with_minimum_size(100, 10);
        let indicator = PageIndicator::new(&config);
        let size = indicator.measure(MeasureSpec::AtMost(500), MeasureSpec::AtMost(500));
        assert_eq!(size, MeasuredSize::new(100, 22));
    }

    #[test]
    fn measure_without_pages_keeps_negative_padding_term() {
        let indicator = PageIndicator::new(&geometry_config());
        let size = indicator.measure(MeasureSpec::AtMost(500), MeasureSpec::AtMost(500));
        // 0 * 22 + (0 - 1) * 5, then max with the zero minimum.
        assert_eq!(size, MeasuredSize::new(0, 22));

        let config = geometry_config().with_minimum_size(-100, -100);
        let indicator = PageIndicator::new(&config);
        let size = indicator.measure(MeasureSpec::AtMost(500), MeasureSpec::AtMost(500));
        assert_eq!(size, MeasuredSize::new(-5, 22));
    }

    #[test]
    fn measure_other_constraints_defer_to_host_default() {
        let config = geometry_config()
            .with_page_count(3)
            .with_minimum_size(4, 6);
        let indicator = PageIndicator::new(&config);

        assert_eq!(
            indicator.measure(MeasureSpec::Exactly(200), MeasureSpec::AtMost(50)),
            MeasuredSize::new(200, 50)
        );
        assert_eq!(
            indicator.measure(MeasureSpec::AtMost(200), MeasureSpec::Unspecified),
            MeasuredSize::new(200, 6)
        );
        assert_eq!(
            indicator.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified),
            MeasuredSize::new(4, 6)
        );
    }

    #[test]
    fn bind_adopts_page_count_when_collection_present() {
        let indicator = PageIndicator::new(&geometry_config().with_page_count(1));
        let pager = Pager::with_collection(Collection::new(5));

        let _binding = indicator.bind(&pager);
        assert_eq!(indicator.page_state().page_count(), 5);
        assert_eq!(indicator.redraw_requests(), 1);
        assert!(indicator.is_bound());
    }

    #[test]
    fn bind_without_collection_keeps_page_count() {
        let indicator = PageIndicator::new(&geometry_config().with_page_count(3));
        let pager = Pager::new();

        let _binding = indicator.bind(&pager);
        assert_eq!(indicator.page_state().page_count(), 3);
        assert_eq!(indicator.redraw_requests(), 0);
        assert_eq!(pager.listener_count(), 2);
    }

    #[test]
    fn selection_requests_exactly_one_redraw() {
        let indicator = PageIndicator::new(&geometry_config());
        let pager = Pager::with_collection(Collection::new(4));
        let _binding = indicator.bind(&pager);
        let before = indicator.redraw_requests();

        pager.set_current(2);
        assert_eq!(indicator.page_state().selected_index(), 2);
        assert_eq!(indicator.redraw_requests(), before + 1);
    }

    #[test]
    fn scroll_events_request_no_redraw() {
        let indicator = PageIndicator::new(&geometry_config());
        let pager = Pager::with_collection(Collection::new(4));
        let _binding = indicator.bind(&pager);
        let before = indicator.redraw_requests();

        pager.report_scroll(1, 0.5, 120);
        pager.set_scroll_state(ScrollState::Dragging);
        pager.set_scroll_state(ScrollState::Settling);

        assert_eq!(indicator.redraw_requests(), before);
        assert_eq!(indicator.page_state().selected_index(), 0);
    }

    #[test]
    fn removing_collection_empties_indicator() {
        let indicator = PageIndicator::new(&geometry_config());
        let pager = Pager::with_collection(Collection::new(4));
        let _binding = indicator.bind(&pager);
        let before = indicator.redraw_requests();

        pager.set_collection(None);
        assert_eq!(indicator.page_state().page_count(), 0);
        assert!(indicator.redraw_requests() > before);
        assert!(indicator.needs_redraw());
    }

    #[test]
    fn repeated_bind_attaches_independent_subscriptions() {
        let indicator = PageIndicator::new(&geometry_config());
        let pager = Pager::with_collection(Collection::new(4));
        let first = indicator.bind(&pager);
        let _second = indicator.bind(&pager);
        assert_eq!(pager.listener_count(), 4);
        let before = indicator.redraw_requests();

        pager.set_current(1);
        assert_eq!(indicator.redraw_requests(), before + 2);

        assert!(first.unbind());
        assert_eq!(pager.listener_count(), 2);
        assert!(indicator.is_bound());
    }

    #[test]
    fn unbind_stops_mirroring() {
        let indicator = PageIndicator::new(&geometry_config());
        let pager = Pager::with_collection(Collection::new(4));
        let binding = indicator.bind(&pager);
        assert!(binding.is_active());

        assert!(binding.unbind());
        assert!(!indicator.is_bound());
        pager.set_current(3);
        assert_eq!(indicator.page_state().selected_index(), 0);
        assert_eq!(pager.listener_count(), 0);
    }

    #[test]
    fn dropped_indicator_leaves_inert_listeners() {
        let pager = Pager::with_collection(Collection::new(4));
        let binding = {
            let indicator = PageIndicator::new(&geometry_config());
            indicator.bind(&pager)
        };
        pager.set_current(2);
        pager.set_collection(None);
        assert!(binding.is_active());
        assert!(binding.unbind());
    }

    #[test]
    fn redraw_handler_runs_per_request_and_may_reenter() {
        let indicator = Rc::new(PageIndicator::new(&geometry_config().with_page_count(3)));
        let hits = Rc::new(Cell::new(0_u32));

        let h = hits.clone();
        let weak = Rc::downgrade(&indicator);
        indicator.set_redraw_handler(move || {
            h.set(h.get() + 1);
            if let Some(indicator) = weak.upgrade() {
                indicator.render(&mut RecordingSurface::new());
            }
        });

        indicator.set_selected_index(1);
        indicator.set_page_count(4);
        assert_eq!(hits.get(), 2);
        assert!(!indicator.needs_redraw());

        indicator.clear_redraw_handler();
        indicator.set_selected_index(0);
        assert_eq!(hits.get(), 2);
        assert_eq!(indicator.redraw_requests(), 3);
    }

    #[test]
    fn handler_may_clear_itself() {
        let indicator = Rc::new(PageIndicator::new(&geometry_config().with_page_count(3)));
        let hits = Rc::new(Cell::new(0_u32));

        let h = hits.clone();
        let weak = Rc::downgrade(&indicator);
        indicator.set_redraw_handler(move || {
            h.set(h.get() + 1);
            if let Some(indicator) = weak.upgrade() {
                indicator.clear_redraw_handler();
            }
        });

        indicator.set_selected_index(1);
        indicator.set_selected_index(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(indicator.redraw_requests(), 2);
    }

    #[test]
    fn handler_replaced_from_inside_stays_replaced() {
        let indicator = Rc::new(PageIndicator::new(&geometry_config().with_page_count(3)));
        let first = Rc::new(Cell::new(0_u32));
        let second = Rc::new(Cell::new(0_u32));

        let f = first.clone();
        let s = second.clone();
        let weak = Rc::downgrade(&indicator);
        indicator.set_redraw_handler(move || {
            f.set(f.get() + 1);
            if let Some(indicator) = weak.upgrade() {
                let s = s.clone();
                indicator.set_redraw_handler(move || s.set(s.get() + 1));
            }
        });

        indicator.set_selected_index(1);
        indicator.set_selected_index(2);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn request_from_inside_handler_gets_follow_up_call() {
        let indicator = Rc::new(PageIndicator::new(&geometry_config().with_page_count(3)));
        let hits = Rc::new(Cell::new(0_u32));

        let h = hits.clone();
        let weak = Rc::downgrade(&indicator);
        indicator.set_redraw_handler(move || {
            h.set(h.get() + 1);
            if let Some(indicator) = weak.upgrade() {
                if indicator.page_state().page_count() == 3 {
                    indicator.set_page_count(5);
                }
                indicator.render(&mut RecordingSurface::new());
            }
        });

        indicator.set_selected_index(1);
        assert_eq!(indicator.redraw_requests(), 2);
        assert_eq!(hits.get(), 2);
        assert_eq!(indicator.page_state().page_count(), 5);
        assert!(!indicator.needs_redraw());

        // Still installed afterwards.
        indicator.set_selected_index(0);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn set_style_requests_redraw() {
        let mut indicator = PageIndicator::default();
        let style = geometry_config().style();
        indicator.set_style(style);
        assert_eq!(indicator.style(), &style);
        assert_eq!(indicator.redraw_requests(), 1);
    }
}
