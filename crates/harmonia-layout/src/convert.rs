//! Conversion between declared lengths and pixels.
//!
//! Horizontal quantities resolve percentages against the parent's content
//! width and vertical ones against its content height. Viewport units always
//! use the window size regardless of axis.

use serde::{Deserialize, Serialize};

use crate::values::{LengthPair, Unit};

/// The window size used for `vw`/`vh`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportContext {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
}

impl ViewportContext {
    /// Create a viewport context.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which parent dimension percentages refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Width, x position, left/right edges.
    Horizontal,
    /// Height, y position, top/bottom edges.
    Vertical,
}

/// Resolve a horizontal length (width, `pos_x`, left/right edges).
#[must_use]
pub fn resolve_horizontal(pair: LengthPair, parent_width_px: f64, viewport: ViewportContext) -> f64 {
    to_px(pair, parent_width_px, viewport)
}

/// Resolve a vertical length (height, `pos_y`, top/bottom edges).
#[must_use]
pub fn resolve_vertical(pair: LengthPair, parent_height_px: f64, viewport: ViewportContext) -> f64 {
    to_px(pair, parent_height_px, viewport)
}

/// Resolve along `axis`, where `parent_px` is the parent's content size on it.
#[must_use]
pub fn resolve(pair: LengthPair, axis: Axis, parent_px: f64, viewport: ViewportContext) -> f64 {
    match axis {
        Axis::Horizontal => resolve_horizontal(pair, parent_px, viewport),
        Axis::Vertical => resolve_vertical(pair, parent_px, viewport),
    }
}

fn to_px(pair: LengthPair, parent_px: f64, viewport: ViewportContext) -> f64 {
    match pair.unit {
        Unit::Unset => 0.0,
        Unit::Pixel => pair.magnitude,
        Unit::Percent => pair.magnitude * parent_px,
        Unit::ViewportWidth => pair.magnitude * viewport.width,
        Unit::ViewportHeight => pair.magnitude * viewport.height,
    }
}

/// Express a pixel quantity as a stored magnitude in `target`.
///
/// This is the inverse of [`resolve`]: relative units come back as fractions.
/// A zero reference size yields zero instead of dividing by it.
#[must_use]
pub fn convert_from_px(px: f64, target: Unit, parent_px: f64, viewport: ViewportContext) -> f64 {
    let reference = match target {
        Unit::Unset => return 0.0,
        Unit::Pixel => return px,
        Unit::Percent => parent_px,
        Unit::ViewportWidth => viewport.width,
        Unit::ViewportHeight => viewport.height,
    };
    if reference == 0.0 { 0.0 } else { px / reference }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportContext = ViewportContext::new(1000.0, 500.0);

    #[test]
    fn relative_units_scale_their_reference() {
        assert_eq!(resolve_horizontal(LengthPair::percent(0.5), 300.0, VIEWPORT), 150.0);
        assert_eq!(resolve_vertical(LengthPair::vh(0.25), 10.0, VIEWPORT), 125.0);
        assert_eq!(resolve_vertical(LengthPair::vw(0.1), 10.0, VIEWPORT), 100.0);
        assert_eq!(resolve_horizontal(LengthPair::UNSET, 10.0, VIEWPORT), 0.0);
    }

    #[test]
    fn back_conversion_inverts_resolution() {
        assert_eq!(convert_from_px(150.0, Unit::Percent, 300.0, VIEWPORT), 0.5);
        assert_eq!(convert_from_px(250.0, Unit::ViewportHeight, 0.0, VIEWPORT), 0.5);
        assert_eq!(convert_from_px(42.0, Unit::Pixel, 0.0, VIEWPORT), 42.0);
        assert_eq!(convert_from_px(42.0, Unit::Percent, 0.0, VIEWPORT), 0.0);
    }
}
