// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indicator geometry, colors, and the construction-time configuration.
//!
//! All geometry is in signed integer device pixels. Values are not validated:
//! a negative radius or padding flows through the arithmetic below and may
//! produce degenerate layouts. Halving uses Rust's truncating `i32` division,
//! so a stroke width of `3` yields a half-stroke of `1`.

use kurbo::{Circle, Point, Rect};
use peniko::Color;

use crate::measure::MeasuredSize;
use crate::state::PageState;

/// Default number of indicators reserved for a windowed presentation.
pub const DEFAULT_VISIBLE_INDICATORS: i32 = 5;
/// Default dot radius, in device pixels.
pub const DEFAULT_INDICATOR_RADIUS: i32 = 4;
/// Default gap between neighboring dots, in device pixels.
pub const DEFAULT_INDICATOR_PADDING: i32 = 8;
/// Default outline width of inactive dots, in device pixels.
pub const DEFAULT_STROKE_WIDTH: i32 = 1;
/// Default fill color of the active dot.
pub const DEFAULT_ACTIVE_COLOR: Color = Color::WHITE;
/// Default outline color of inactive dots.
pub const DEFAULT_INACTIVE_COLOR: Color = Color::from_rgb8(0x9e, 0x9e, 0x9e);

/// Geometry and colors of a row of dot indicators.
///
/// The dot diameter ([`IndicatorStyle::indicator_size`]) is always derived
/// from the radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndicatorStyle {
    radius: i32,
    stroke_width: i32,
    padding: i32,
    active_color: Color,
    inactive_color: Color,
    visible_count: i32,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        IndicatorConfig::default().style()
    }
}

impl IndicatorStyle {
    /// Dot radius.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> i32 {
        self.radius
    }

    /// Dot diameter, `2 * radius`.
    #[inline]
    #[must_use]
    pub const fn indicator_size(&self) -> i32 {
        self.radius.saturating_mul(2)
    }

    /// Outline width of inactive dots.
    #[inline]
    #[must_use]
    pub const fn stroke_width(&self) -> i32 {
        self.stroke_width
    }

    /// Gap between neighboring dots.
    #[inline]
    #[must_use]
    pub const fn padding(&self) -> i32 {
        self.padding
    }

    /// Fill color of the active dot.
    #[inline]
    #[must_use]
    pub const fn active_color(&self) -> Color {
        self.active_color
    }

    /// Outline color of inactive dots.
    #[inline]
    #[must_use]
    pub const fn inactive_color(&self) -> Color {
        self.inactive_color
    }

    /// Number of indicators reserved for a windowed presentation.
    ///
    /// This value is carried through configuration but is not consulted by
    /// measurement or rendering; every page always gets a dot.
    #[inline]
    #[must_use]
    pub const fn visible_count(&self) -> i32 {
        self.visible_count
    }

    const fn half_stroke(&self) -> i32 {
        self.stroke_width / 2
    }

    /// Horizontal distance between the left edges of two neighboring dots.
    #[must_use]
    pub const fn dot_step(&self) -> i32 {
        self.indicator_size()
            .saturating_add(self.padding)
            .saturating_add(self.half_stroke())
    }

    /// Left edge of the bounding box of dot `index`.
    #[must_use]
    pub const fn dot_left(&self, index: i32) -> i32 {
        index
            .saturating_mul(self.dot_step())
            .saturating_add(self.half_stroke())
    }

    /// Top edge shared by the bounding boxes of all dots.
    #[must_use]
    pub const fn dot_top(&self) -> i32 {
        self.half_stroke()
    }

    /// Center of dot `index`, snapped to whole device pixels.
    #[must_use]
    pub fn dot_center(&self, index: i32) -> Point {
        let half = self.indicator_size() / 2;
        let cx = self.dot_left(index).saturating_add(half);
        let cy = self.dot_top().saturating_add(half);
        Point::new(f64::from(cx), f64::from(cy))
    }

    /// Circle drawn for dot `index`.
    #[must_use]
    pub fn dot_circle(&self, index: i32) -> Circle {
        Circle::new(self.dot_center(index), f64::from(self.radius))
    }

    /// Bounding box of dot `index`, excluding the stroke.
    #[must_use]
    pub fn dot_bounds(&self, index: i32) -> Rect {
        let left = self.dot_left(index);
        let top = self.dot_top();
        let size = self.indicator_size();
        Rect::new(
            f64::from(left),
            f64::from(top),
            f64::from(left.saturating_add(size)),
            f64::from(top.saturating_add(size)),
        )
    }

    /// Size a row of `page_count` dots asks for.
    ///
    /// With `page_count == 0` the `(page_count - 1) * padding` term is `-padding`;
    /// it is kept rather than clamped.
    #[must_use]
    pub const fn desired_size(&self, page_count: i32) -> MeasuredSize {
        let cell = self.indicator_size().saturating_add(self.stroke_width);
        let width = page_count
            .saturating_mul(cell)
            .saturating_add(page_count.saturating_sub(1).saturating_mul(self.padding));
        MeasuredSize::new(width, cell)
    }
}

/// Construction-time options for a [`PageIndicator`](crate::PageIndicator).
///
/// Unset options fall back to the `DEFAULT_*` constants in this crate.
///
/// ```rust
/// use understory_page_indicator::IndicatorConfig;
///
/// let config = IndicatorConfig::new()
///     .with_page_count(3)
///     .with_indicator_radius(10)
///     .with_stroke_width(2)
///     .with_indicator_padding(5);
///
/// let style = config.style();
/// assert_eq!(style.indicator_size(), 20);
/// assert_eq!(style.desired_size(3).width, 76);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndicatorConfig {
    /// Number of dots drawn before any container is bound.
    pub page_count: usize,
    /// Dot radius in device pixels.
    pub indicator_radius: i32,
    /// Indicators reserved for windowing; negative values become the dot diameter.
    pub visible_indicator_count: i32,
    /// Gap between neighboring dots.
    pub indicator_padding: i32,
    /// Outline width of inactive dots.
    pub stroke_width: i32,
    /// Fill color of the active dot.
    pub selected_color: Color,
    /// Outline color of inactive dots.
    pub inactive_color: Color,
    /// Minimum size the host declares for the widget.
    pub minimum_size: MeasuredSize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            page_count: 0,
            indicator_radius: DEFAULT_INDICATOR_RADIUS,
            visible_indicator_count: DEFAULT_VISIBLE_INDICATORS,
            indicator_padding: DEFAULT_INDICATOR_PADDING,
            stroke_width: DEFAULT_STROKE_WIDTH,
            selected_color: DEFAULT_ACTIVE_COLOR,
            inactive_color: DEFAULT_INACTIVE_COLOR,
            minimum_size: MeasuredSize::ZERO,
        }
    }
}

impl IndicatorConfig {
    /// Configuration with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial number of dots.
    #[must_use]
    pub fn with_page_count(mut self, page_count: usize) -> Self {
        self.page_count = page_count;
        self
    }

    /// Set the dot radius.
    #[must_use]
    pub fn with_indicator_radius(mut self, radius: i32) -> Self {
        self.indicator_radius = radius;
        self
    }

    /// Set the number of indicators reserved for windowing.
    #[must_use]
    pub fn with_visible_indicator_count(mut self, count: i32) -> Self {
        self.visible_indicator_count = count;
        self
    }

    /// Set the gap between neighboring dots.
    #[must_use]
    pub fn with_indicator_padding(mut self, padding: i32) -> Self {
        self.indicator_padding = padding;
        self
    }

    /// Set the outline width of inactive dots.
    #[must_use]
    pub fn with_stroke_width(mut self, width: i32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set the fill color of the active dot.
    #[must_use]
    pub fn with_selected_color(mut self, color: Color) -> Self {
        self.selected_color = color;
        self
    }

    /// Set the outline color of inactive dots.
    #[must_use]
    pub fn with_inactive_color(mut self, color: Color) -> Self {
        self.inactive_color = color;
        self
    }

    /// Set the minimum size the host declares for the widget.
    #[must_use]
    pub fn with_minimum_size(mut self, width: i32, height: i32) -> Self {
        self.minimum_size = MeasuredSize::new(width, height);
        self
    }

    /// Resolve the dot style.
    ///
    /// A negative visible indicator count is replaced by the dot diameter.
    #[must_use]
    pub fn style(&self) -> IndicatorStyle {
        let indicator_size = self.indicator_radius.saturating_mul(2);
        let visible_count = if self.visible_indicator_count < 0 {
            log::debug!(
                "visible indicator count {} is negative, using indicator size {indicator_size}",
                self.visible_indicator_count
            );
            indicator_size
        } else {
            self.visible_indicator_count
        };
        IndicatorStyle {
            radius: self.indicator_radius,
            stroke_width: self.stroke_width,
            padding: self.indicator_padding,
            active_color: self.selected_color,
            inactive_color: self.inactive_color,
            visible_count,
        }
    }

    /// Initial page state: the configured page count with the first page selected.
    #[must_use]
    pub fn page_state(&self) -> PageState {
        PageState::new(self.page_count)
    }
}
