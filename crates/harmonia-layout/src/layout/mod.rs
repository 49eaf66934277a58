//! Box model, placement, overflow and scrolling.

mod anchors;
mod arena;
mod box_model;
mod box_node;
mod overflow;
mod positioned;
mod resolver;
mod viewport;

pub use anchors::{AnchorBand, AnchorBounds, apply_anchors};
pub use arena::BoxArena;
pub use box_model::{ComputedBox, EdgeSizes};
pub use box_node::{BoxNode, ParentLink, Visibility};
pub use overflow::{OverflowBehavior, OverflowState, OverflowTracker};
pub use positioned::{FlowCursor, PositionType, place_child, place_self};
pub use resolver::Resolver;
pub use viewport::{ContentViewport, DEFAULT_SCROLL_STEP, ScrollDirection, Scrollbar};
