//! Position types and the flow cursor.
//!
//! Children of a box are placed in structural order. A cursor starts at the
//! top-left of the content box and moves down as in-flow children are
//! placed. Positions produced here are in the parent's padding-box
//! coordinates before any scroll offset is applied.

use serde::{Deserialize, Serialize};

use super::box_model::{ComputedBox, EdgeSizes};

/// How a box is placed relative to its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionType {
    /// Stacked vertically at the cursor; position offsets are ignored.
    #[default]
    Static,
    /// Placed like `Static`, then shifted by the position offsets. The
    /// cursor advances as if the shift did not happen.
    Relative,
    /// Placed at the position offsets inside the parent's padding and taken
    /// out of flow; the cursor does not move.
    Absolute,
}

impl PositionType {
    /// Whether boxes of this type advance the cursor.
    #[must_use]
    pub const fn is_in_flow(self) -> bool {
        !matches!(self, Self::Absolute)
    }
}

/// Where the next in-flow child goes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowCursor {
    /// Horizontal cursor position.
    pub x: f64,
    /// Vertical cursor position.
    pub y: f64,
}

impl FlowCursor {
    /// Start at the top-left of the content box.
    #[must_use]
    pub const fn at_content_origin(padding: &EdgeSizes) -> Self {
        Self {
            x: padding.left,
            y: padding.up,
        }
    }

    /// Move past a leaf control of the given height.
    pub fn advance(&mut self, height: f64) {
        self.y += height;
    }
}

/// Compute the padding-box origin of `child` and advance `cursor` for
/// in-flow types.
///
/// `container_padding` is the resolved padding of the parent box.
pub fn place_child(
    position_type: PositionType,
    cursor: &mut FlowCursor,
    child: &ComputedBox,
    container_padding: &EdgeSizes,
) -> (f64, f64) {
    match position_type {
        PositionType::Static | PositionType::Relative => {
            cursor.y += child.margin.up;
            let mut x = cursor.x + child.margin.left;
            let mut y = cursor.y;
            cursor.y += child.total_height() + child.margin.down;
            if position_type == PositionType::Relative {
                x += child.pos_x_px;
                y += child.pos_y_px;
            }
            (x, y)
        }
        PositionType::Absolute => (
            child.pos_x_px + container_padding.left + child.margin.left,
            child.pos_y_px + container_padding.up + child.margin.up,
        ),
    }
}

/// Position of a box whose host parent is not a layout box.
#[must_use]
pub fn place_self(computed: &ComputedBox) -> (f64, f64) {
    (
        computed.pos_x_px + computed.margin.left,
        computed.pos_y_px + computed.margin.up,
    )
}
