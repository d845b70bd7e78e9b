// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement constraints and results.

/// A one-axis constraint handed down by the host's layout pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MeasureSpec {
    /// The widget must be exactly this size.
    Exactly(i32),
    /// The widget may be any size up to this bound.
    AtMost(i32),
    /// The host imposes no constraint.
    Unspecified,
}

impl MeasureSpec {
    /// Build a spec from a size and a "bounded" flag, as many hosts report them.
    ///
    /// A bounded axis becomes [`MeasureSpec::AtMost`]; an unbounded one becomes
    /// [`MeasureSpec::Exactly`], since it is not an upper bound the widget may
    /// shrink below.
    #[must_use]
    pub const fn from_available(size: i32, bounded: bool) -> Self {
        if bounded {
            Self::AtMost(size)
        } else {
            Self::Exactly(size)
        }
    }

    /// Returns `true` for [`MeasureSpec::AtMost`].
    #[must_use]
    pub const fn is_at_most(self) -> bool {
        matches!(self, Self::AtMost(_))
    }

    /// Host-default sizing: the spec's size if it has one, otherwise `minimum`.
    #[must_use]
    pub const fn resolve_default(self, minimum: i32) -> i32 {
        match self {
            Self::Exactly(size) | Self::AtMost(size) => size,
            Self::Unspecified => minimum,
        }
    }
}

/// A measured widget size in integer device pixels.
///
/// Components may be negative; see
/// [`IndicatorStyle::desired_size`](crate::IndicatorStyle::desired_size).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MeasuredSize {
    /// Width in device pixels.
    pub width: i32,
    /// Height in device pixels.
    pub height: i32,
}

impl MeasuredSize {
    /// A zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a size from its components.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}
