//! Scroll state of a box's content viewport.
//!
//! A box that can scroll wraps its children in a `ContentViewport` scene
//! node. Its children are laid out as the box's children, shifted up and
//! left by the scroll offsets. The viewport keeps the scroll range in sync
//! with the overflow of the last layout pass.

use harmonia_dom::NodeId;
use serde::{Deserialize, Serialize};

use super::overflow::{OverflowBehavior, OverflowState};
use crate::convert::{ViewportContext, resolve_horizontal, resolve_vertical};
use crate::values::LengthPair;

/// Default distance moved by one wheel step.
pub const DEFAULT_SCROLL_STEP: LengthPair = LengthPair::px(20.0);

/// A wheel or key scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Toward the top.
    Up,
    /// Toward the bottom.
    Down,
    /// Toward the left.
    Left,
    /// Toward the right.
    Right,
}

/// A scrollbar attached to a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scrollbar {
    /// Whether the host shows it.
    pub visible: bool,
    /// Current offset.
    pub value: f64,
    /// Largest offset.
    pub max: f64,
}

/// Scroll offsets and ranges for one box.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentViewport {
    node: NodeId,
    scroll_left_px: f64,
    scroll_top_px: f64,
    max_scroll_x_px: f64,
    max_scroll_y_px: f64,
    step_x: LengthPair,
    step_y: LengthPair,
    horizontal_scrollbar: Option<Scrollbar>,
    vertical_scrollbar: Option<Scrollbar>,
}

impl ContentViewport {
    /// State for the wrapper scene node `node`, without scrollbars.
    #[must_use]
    pub const fn new(node: NodeId) -> Self {
        Self {
            node,
            scroll_left_px: 0.0,
            scroll_top_px: 0.0,
            max_scroll_x_px: 0.0,
            max_scroll_y_px: 0.0,
            step_x: DEFAULT_SCROLL_STEP,
            step_y: DEFAULT_SCROLL_STEP,
            horizontal_scrollbar: None,
            vertical_scrollbar: None,
        }
    }

    /// The wrapper scene node.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Horizontal scroll offset.
    #[must_use]
    pub const fn scroll_left(&self) -> f64 {
        self.scroll_left_px
    }

    /// Vertical scroll offset.
    #[must_use]
    pub const fn scroll_top(&self) -> f64 {
        self.scroll_top_px
    }

    /// Largest horizontal offset allowed.
    #[must_use]
    pub const fn max_scroll_x(&self) -> f64 {
        self.max_scroll_x_px
    }

    /// Largest vertical offset allowed.
    #[must_use]
    pub const fn max_scroll_y(&self) -> f64 {
        self.max_scroll_y_px
    }

    /// Horizontal wheel step.
    #[must_use]
    pub const fn step_x(&self) -> LengthPair {
        self.step_x
    }

    /// Vertical wheel step.
    #[must_use]
    pub const fn step_y(&self) -> LengthPair {
        self.step_y
    }

    /// Set the horizontal wheel step.
    pub fn set_step_x(&mut self, step: LengthPair) {
        self.step_x = step;
    }

    /// Set the vertical wheel step.
    pub fn set_step_y(&mut self, step: LengthPair) {
        self.step_y = step;
    }

    /// The horizontal scrollbar, if attached.
    #[must_use]
    pub const fn horizontal_scrollbar(&self) -> Option<&Scrollbar> {
        self.horizontal_scrollbar.as_ref()
    }

    /// The vertical scrollbar, if attached.
    #[must_use]
    pub const fn vertical_scrollbar(&self) -> Option<&Scrollbar> {
        self.vertical_scrollbar.as_ref()
    }

    /// Attach or detach scrollbars.
    pub fn set_scrollbars(&mut self, horizontal: bool, vertical: bool) {
        self.horizontal_scrollbar = horizontal.then(Scrollbar::default);
        self.vertical_scrollbar = vertical.then(Scrollbar::default);
        self.sync_scrollbars();
    }

    /// Set the horizontal offset, clamped to `[0, max_scroll_x]`.
    pub fn set_scroll_left(&mut self, px: f64) {
        self.scroll_left_px = px.clamp(0.0, self.max_scroll_x_px);
        self.sync_scrollbars();
    }

    /// Set the vertical offset, clamped to `[0, max_scroll_y]`.
    pub fn set_scroll_top(&mut self, px: f64) {
        self.scroll_top_px = px.clamp(0.0, self.max_scroll_y_px);
        self.sync_scrollbars();
    }

    /// Move both offsets by a delta, clamping each.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.set_scroll_left(self.scroll_left_px + dx);
        self.set_scroll_top(self.scroll_top_px + dy);
    }

    /// Move one wheel step. Steps resolve against the owning box's content
    /// size. Returns whether an offset changed.
    pub fn scroll_step(
        &mut self,
        direction: ScrollDirection,
        content_width: f64,
        content_height: f64,
        viewport: ViewportContext,
    ) -> bool {
        let before = (self.scroll_left_px, self.scroll_top_px);
        let dx = resolve_horizontal(self.step_x, content_width, viewport);
        let dy = resolve_vertical(self.step_y, content_height, viewport);
        match direction {
            ScrollDirection::Up => self.scroll_by(0.0, -dy),
            ScrollDirection::Down => self.scroll_by(0.0, dy),
            ScrollDirection::Left => self.scroll_by(-dx, 0.0),
            ScrollDirection::Right => self.scroll_by(dx, 0.0),
        }
        before != (self.scroll_left_px, self.scroll_top_px)
    }

    /// Offsets to subtract from child positions. Zero unless the box scrolls.
    #[must_use]
    pub fn bias(&self, behavior: OverflowBehavior) -> (f64, f64) {
        match behavior {
            OverflowBehavior::Scroll => (self.scroll_left_px, self.scroll_top_px),
            OverflowBehavior::Hidden | OverflowBehavior::Visible => (0.0, 0.0),
        }
    }

    /// Update ranges after a layout pass.
    ///
    /// Only `Scroll` exposes a range; the other behaviors pin the offsets to
    /// zero and hide the scrollbars. Offsets past a shrunken range are
    /// pulled back to it.
    pub fn apply_overflow(&mut self, overflow: &OverflowState, behavior: OverflowBehavior) {
        let (max_x, max_y) = match behavior {
            OverflowBehavior::Scroll => (overflow.x_px.max(0.0), overflow.y_px.max(0.0)),
            OverflowBehavior::Hidden | OverflowBehavior::Visible => (0.0, 0.0),
        };
        self.max_scroll_x_px = max_x;
        self.max_scroll_y_px = max_y;
        self.scroll_left_px = self.scroll_left_px.clamp(0.0, max_x);
        self.scroll_top_px = self.scroll_top_px.clamp(0.0, max_y);
        self.sync_scrollbars();
    }

    fn sync_scrollbars(&mut self) {
        if let Some(bar) = &mut self.horizontal_scrollbar {
            bar.visible = self.max_scroll_x_px > 0.0;
            bar.max = self.max_scroll_x_px;
            bar.value = self.scroll_left_px;
        }
        if let Some(bar) = &mut self.vertical_scrollbar {
            bar.visible = self.max_scroll_y_px > 0.0;
            bar.max = self.max_scroll_y_px;
            bar.value = self.scroll_top_px;
        }
    }
}
