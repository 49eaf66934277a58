//! Resolved box geometry.
//!
//! ```text
//! ┌───────────────────────────────┐
//! │          margin-up            │
//! │   ┌───────────────────────┐   │
//! │   │     padding-up        │   │
//! │ m │ p ┌───────────────┐ p │ m │
//! │ a │ a │    CONTENT    │ a │ a │
//! │ r │ d │ width_px  x   │ d │ r │
//! │ g │   │ height_px     │   │ g │
//! │   │   └───────────────┘   │   │
//! │   │     padding-down      │   │
//! │   └───────────────────────┘   │
//! │          margin-down          │
//! └───────────────────────────────┘
//! ```
//!
//! The host rectangle of a box is its padding box: content plus padding.
//! Margins only move the box and count toward its parent's overflow.

use crate::convert::ViewportContext;

/// Pixel sizes of the four edges of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeSizes {
    /// Top edge.
    pub up: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub down: f64,
    /// Left edge.
    pub left: f64,
}

impl EdgeSizes {
    /// Create edge sizes in clockwise order from the top.
    #[must_use]
    pub const fn new(up: f64, right: f64, down: f64, left: f64) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    /// `left + right`.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `up + down`.
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.up + self.down
    }
}

/// Everything a layout pass derives for one box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedBox {
    /// Content width.
    pub width_px: f64,
    /// Content height.
    pub height_px: f64,
    /// Resolved padding.
    pub padding: EdgeSizes,
    /// Resolved margin.
    pub margin: EdgeSizes,
    /// Resolved horizontal position offset.
    pub pos_x_px: f64,
    /// Resolved vertical position offset.
    pub pos_y_px: f64,
    /// Content width of the parent box, or the viewport width for a root.
    pub parent_width_px: f64,
    /// Content height of the parent box, or the viewport height for a root.
    pub parent_height_px: f64,
    /// Viewport used for this resolution.
    pub viewport: ViewportContext,
}

impl ComputedBox {
    /// Content plus horizontal padding; the host width.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.width_px + self.padding.horizontal()
    }

    /// Content plus vertical padding; the host height.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.height_px + self.padding.vertical()
    }

    /// Width of the margin box.
    #[must_use]
    pub fn outer_width(&self) -> f64 {
        self.total_width() + self.margin.horizontal()
    }

    /// Height of the margin box.
    #[must_use]
    pub fn outer_height(&self) -> f64 {
        self.total_height() + self.margin.vertical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_add_padding_but_not_margin() {
        let computed = ComputedBox {
            width_px: 100.0,
            height_px: 50.0,
            padding: EdgeSizes::new(1.0, 2.0, 3.0, 4.0),
            margin: EdgeSizes::new(10.0, 10.0, 10.0, 10.0),
            ..ComputedBox::default()
        };
        assert_eq!(computed.total_width(), 106.0);
        assert_eq!(computed.total_height(), 54.0);
        assert_eq!(computed.outer_width(), 126.0);
        assert_eq!(computed.outer_height(), 74.0);
    }
}
