//! Overflow detection.
//!
//! After a box has placed its children, each child's margin box is compared
//! with the parent's content box. The excess past the far edges is the
//! overflow; the excess past the near edges is the negative overflow. Both
//! are running maxima over children and never negative.

use serde::{Deserialize, Serialize};

/// What a box does with content that does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowBehavior {
    /// Clip and expose a scroll range equal to the overflow.
    #[default]
    Scroll,
    /// Clip without scrolling.
    Hidden,
    /// Neither clip nor scroll.
    Visible,
}

impl OverflowBehavior {
    /// Whether painting clips children to the box.
    #[must_use]
    pub const fn clips(self) -> bool {
        !matches!(self, Self::Visible)
    }
}

/// Overflow found by the last layout pass.
///
/// The overflowed flags are derived from the magnitudes, so a box can never
/// report overflow with a zero amount or the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverflowState {
    /// Pixels by which children pass the right content edge.
    pub x_px: f64,
    /// Pixels by which children pass the bottom content edge.
    pub y_px: f64,
    /// Pixels by which children pass the left content edge.
    pub negative_x_px: f64,
    /// Pixels by which children pass the top content edge.
    pub negative_y_px: f64,
    /// Rightmost child extent, measured from the content origin.
    pub content_width_px: f64,
    /// Bottommost child extent, measured from the content origin.
    pub content_height_px: f64,
}

impl OverflowState {
    /// Whether content passes the right edge.
    #[must_use]
    pub fn is_overflowed_x(&self) -> bool {
        self.x_px > 0.0
    }

    /// Whether content passes the bottom edge.
    #[must_use]
    pub fn is_overflowed_y(&self) -> bool {
        self.y_px > 0.0
    }
}

/// Accumulates child extents against a content box.
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowTracker {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    state: OverflowState,
}

impl OverflowTracker {
    /// Track against the content box at (`left`, `top`) with the given size.
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
            state: OverflowState::default(),
        }
    }

    /// Record one child's margin box, in unscrolled parent coordinates.
    pub fn observe(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let state = &mut self.state;
        state.x_px = state.x_px.max(x1 - self.right);
        state.y_px = state.y_px.max(y1 - self.bottom);
        state.negative_x_px = state.negative_x_px.max(self.left - x0);
        state.negative_y_px = state.negative_y_px.max(self.top - y0);
        state.content_width_px = state.content_width_px.max(x1 - self.left);
        state.content_height_px = state.content_height_px.max(y1 - self.top);
    }

    /// Overflow so far.
    #[must_use]
    pub const fn state(&self) -> &OverflowState {
        &self.state
    }

    /// Finish tracking.
    #[must_use]
    pub const fn finish(self) -> OverflowState {
        self.state
    }
}
