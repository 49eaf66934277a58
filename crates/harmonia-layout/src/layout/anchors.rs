//! Anchor clamping for leaf controls placed inside a box.
//!
//! A control with any non-zero anchor is pinned to the cursor and sized by
//! its anchors. The anchors are first clamped to the band that stays inside
//! the parent's padding, expressed as fractions of the parent's host size.

use harmonia_dom::{ControlData, EdgeValues};
use serde::{Deserialize, Serialize};

use super::box_model::EdgeSizes;

/// Which parent size the vertical anchor band is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorBand {
    /// Top/bottom padding divided by the parent's total height.
    #[default]
    ContentHeight,
    /// Top/bottom padding divided by the parent's total width. Matches older
    /// scenes that were tuned against this behavior.
    LegacyWidth,
}

/// Allowed anchor ranges on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorBounds {
    /// Smallest left/right anchor.
    pub min_x: f64,
    /// Largest left/right anchor.
    pub max_x: f64,
    /// Smallest top/bottom anchor.
    pub min_y: f64,
    /// Largest top/bottom anchor.
    pub max_y: f64,
}

impl AnchorBounds {
    /// Compute the band for a parent with the given padding and host size.
    ///
    /// A zero or non-finite divisor falls back to `[0, 1]`, as does padding
    /// too large to express as a fraction. If the padding covers the whole
    /// box the band collapses to its midpoint.
    #[must_use]
    pub fn for_parent(padding: &EdgeSizes, total_width: f64, total_height: f64, band: AnchorBand) -> Self {
        let (min_x, max_x) = band_for(padding.left, padding.right, total_width);
        let vertical_divisor = match band {
            AnchorBand::ContentHeight => total_height,
            AnchorBand::LegacyWidth => total_width,
        };
        let (min_y, max_y) = band_for(padding.up, padding.down, vertical_divisor);
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Clamp all four anchors into the band.
    #[must_use]
    pub fn clamp(&self, anchors: &EdgeValues) -> EdgeValues {
        EdgeValues::new(
            anchors.left.clamp(self.min_x, self.max_x),
            anchors.top.clamp(self.min_y, self.max_y),
            anchors.right.clamp(self.min_x, self.max_x),
            anchors.bottom.clamp(self.min_y, self.max_y),
        )
    }
}

fn band_for(near: f64, far: f64, divisor: f64) -> (f64, f64) {
    if !(divisor > 0.0 && divisor.is_finite()) {
        return (0.0, 1.0);
    }
    let min = near / divisor;
    let max = 1.0 - far / divisor;
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    if min > max {
        let mid = f64::midpoint(min, max);
        (mid, mid)
    } else {
        (min, max)
    }
}

/// Clamp the control's anchors, zero its offsets and return the size its
/// anchors span inside a parent of the given host size.
pub fn apply_anchors(
    control: &mut ControlData,
    bounds: &AnchorBounds,
    total_width: f64,
    total_height: f64,
) -> (f64, f64) {
    control.anchors = bounds.clamp(&control.anchors);
    control.offsets = EdgeValues::default();
    let width = (control.anchors.right - control.anchors.left).max(0.0) * total_width;
    let height = (control.anchors.bottom - control.anchors.top).max(0.0) * total_height;
    (width, height)
}
