// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface an indicator renders onto.
//!
//! [`IndicatorSurface`] is the only thing [`PageIndicator::render`](crate::PageIndicator::render)
//! needs from a renderer: two circle primitives. Hosts implement it on top of
//! whatever they draw with (a scene builder, a canvas, an imaging backend).
//!
//! [`RecordingSurface`] does not rasterize anything. It records the commands
//! it receives so tests and debugging tools can assert on them.

use alloc::vec::Vec;

use kurbo::Circle;
use peniko::Color;

/// Circle drawing primitives consumed by the indicator.
pub trait IndicatorSurface {
    /// Fill `circle` with `color`.
    fn fill_circle(&mut self, circle: Circle, color: Color);

    /// Outline `circle` with a stroke of `width` device pixels.
    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64);
}

impl<S: IndicatorSurface + ?Sized> IndicatorSurface for &mut S {
    fn fill_circle(&mut self, circle: Circle, color: Color) {
        (**self).fill_circle(circle, color);
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        (**self).stroke_circle(circle, color, width);
    }
}

/// One primitive received by a [`RecordingSurface`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DotCommand {
    /// A filled circle.
    Fill {
        /// Circle geometry.
        circle: Circle,
        /// Fill color.
        color: Color,
    },
    /// A stroked circle.
    Stroke {
        /// Circle geometry.
        circle: Circle,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        width: f64,
    },
}

impl DotCommand {
    /// Geometry of the drawn circle.
    #[must_use]
    pub fn circle(&self) -> Circle {
        match *self {
            Self::Fill { circle, .. } | Self::Stroke { circle, .. } => circle,
        }
    }

    /// Returns `true` for [`DotCommand::Fill`].
    #[must_use]
    pub fn is_fill(&self) -> bool {
        matches!(self, Self::Fill { .. })
    }
}

/// Surface that records every primitive instead of drawing it.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DotCommand>,
}

impl RecordingSurface {
    /// Create an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in the order they were received.
    #[must_use]
    pub fn commands(&self) -> &[DotCommand] {
        &self.commands
    }

    /// Number of filled circles recorded.
    #[must_use]
    pub fn fill_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_fill()).count()
    }

    /// Number of stroked circles recorded.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.commands.len() - self.fill_count()
    }

    /// Forget all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl IndicatorSurface for RecordingSurface {
    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.commands.push(DotCommand::Fill { circle, color });
    }

    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64) {
        self.commands.push(DotCommand::Stroke {
            circle,
            color,
            width,
        });
    }
}
