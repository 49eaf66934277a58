//! The layout pass.
//!
//! Resolution is top-down. A box is sized against its parent box's content
//! size (or the viewport for a root), writes its padding-box size to its
//! host node, then places its children in structural order:
//!
//! 1. Child boxes are sized, placed by [`place_child`], and recursed into.
//! 2. Leaf controls without anchors sit at the cursor and push it down.
//! 3. Anchored leaf controls are pinned at the cursor and sized by their
//!    clamped anchors without moving it.
//!
//! Every placed child's margin box feeds an [`OverflowTracker`]; the result
//! is stored on the box and updates its scroll range. Positions are shifted
//! by the scroll offsets last, so the extents used for overflow never depend
//! on how far the box is scrolled.

#[cfg(feature = "layout-trace")]
use std::cell::Cell;

use harmonia_dom::{NodeId, NodeType, SceneTree};

use super::anchors::{AnchorBand, AnchorBounds, apply_anchors};
use super::arena::BoxArena;
use super::box_model::{ComputedBox, EdgeSizes};
use super::box_node::{ParentLink, Visibility};
use super::overflow::OverflowTracker;
use super::positioned::{FlowCursor, place_child, place_self};
use crate::convert::{ViewportContext, resolve_horizontal, resolve_vertical};
use crate::error::LayoutError;
use crate::events::{LayoutChangeEvent, LayoutChangeReason};
use crate::values::BoxSides;

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// The kinds of children a box lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutChild {
    Box(NodeId),
    Leaf(NodeId),
}

/// One layout pass over a scene tree and its boxes.
///
/// The resolver borrows both for the duration of the pass and collects a
/// change event for every box whose host rectangle moved or resized.
#[derive(Debug)]
pub struct Resolver<'a> {
    tree: &'a mut SceneTree,
    boxes: &'a mut BoxArena,
    viewport: ViewportContext,
    anchor_band: AnchorBand,
    changes: Vec<LayoutChangeEvent>,
}

impl<'a> Resolver<'a> {
    /// Prepare a pass.
    pub fn new(
        tree: &'a mut SceneTree,
        boxes: &'a mut BoxArena,
        viewport: ViewportContext,
        anchor_band: AnchorBand,
    ) -> Self {
        Self {
            tree,
            boxes,
            viewport,
            anchor_band,
            changes: Vec::new(),
        }
    }

    /// Finish the pass and return the geometry changes it produced.
    #[must_use]
    pub fn into_changes(self) -> Vec<LayoutChangeEvent> {
        self.changes
    }

    /// Resolve every box attached to the window, root by root.
    pub fn resolve_all(&mut self) {
        for root in self.roots() {
            self.resolve_box(root);
        }
    }

    /// Resolve `id` and everything below it.
    ///
    /// A box whose host parent is not a box positions itself from its own
    /// offsets and margins. A box laid out by a parent keeps the position
    /// that parent gave it; resolve the parent to move it.
    ///
    /// # Errors
    ///
    /// [`LayoutError::NotABox`] if `id` has no box.
    pub fn resolve(&mut self, id: NodeId) -> Result<(), LayoutError> {
        if !self.boxes.contains(id) {
            return Err(LayoutError::NotABox(id));
        }
        self.resolve_box(id);
        Ok(())
    }

    /// Boxes attached to the window that have no parent box, in tree order.
    pub fn roots(&mut self) -> Vec<NodeId> {
        let attached: Vec<NodeId> = self
            .tree
            .descendants(NodeId::ROOT)
            .filter(|id| self.boxes.contains(*id))
            .collect();
        attached
            .into_iter()
            .filter(|id| self.parent_link(*id) == ParentLink::Root)
            .collect()
    }

    /// Walk parent links up from `id` to the box that has no parent box.
    pub fn layout_root(&mut self, id: NodeId) -> NodeId {
        let mut current = id;
        while let ParentLink::Box(parent) = self.parent_link(current) {
            current = parent;
        }
        current
    }

    /// The nearest ancestor box of `id`, looked up once and cached on the
    /// box until the engine invalidates it.
    pub fn parent_link(&mut self, id: NodeId) -> ParentLink {
        let cached = self
            .boxes
            .get(id)
            .map_or(ParentLink::Root, |node| node.parent_link());
        if cached != ParentLink::Unresolved {
            return cached;
        }
        let link = self
            .tree
            .ancestors(id)
            .find(|ancestor| self.carries_box(*ancestor))
            .map_or(ParentLink::Root, ParentLink::Box);
        if let Some(node) = self.boxes.get_mut(id) {
            node.set_parent_link(link);
        }
        link
    }

    fn carries_box(&self, id: NodeId) -> bool {
        self.tree.is_container(id) && self.boxes.contains(id)
    }

    fn classify(&self, id: NodeId) -> Option<LayoutChild> {
        match self.tree.node_type(id)? {
            NodeType::Container if self.boxes.contains(id) => Some(LayoutChild::Box(id)),
            NodeType::Control(_) => Some(LayoutChild::Leaf(id)),
            _ => None,
        }
    }

    /// Whether a parent box places `id`, either directly or through its
    /// content viewport.
    fn is_placed_by_parent(&self, id: NodeId) -> bool {
        let Some(host_parent) = self.tree.parent(id) else {
            return false;
        };
        if self.carries_box(host_parent) {
            return true;
        }
        self.tree.is_content_viewport(host_parent)
            && self
                .tree
                .parent(host_parent)
                .is_some_and(|owner| self.carries_box(owner))
    }

    fn parent_content_size(&mut self, id: NodeId) -> (f64, f64) {
        match self.parent_link(id) {
            ParentLink::Box(parent) => self
                .boxes
                .get(parent)
                .map_or((0.0, 0.0), |p| (p.width_px(), p.height_px())),
            ParentLink::Root | ParentLink::Unresolved => (self.viewport.width, self.viewport.height),
        }
    }

    fn resolve_box(&mut self, id: NodeId) {
        let (parent_width, parent_height) = self.parent_content_size(id);
        self.size_box(id, parent_width, parent_height);
        if !self.is_placed_by_parent(id)
            && let Some(node) = self.boxes.get(id)
        {
            let (x, y) = place_self(node.computed());
            self.move_box(id, x, y);
        }
        self.layout_children(id);
    }

    /// Resolve the declared lengths of `id` against its parent's content size
    /// and write the padding-box size to its host node.
    fn size_box(&mut self, id: NodeId, parent_width: f64, parent_height: f64) {
        let viewport = self.viewport;
        let Some(node) = self.boxes.get_mut(id) else {
            return;
        };
        let horizontal = |pair| resolve_horizontal(pair, parent_width, viewport);
        let vertical = |pair| resolve_vertical(pair, parent_height, viewport);
        let edges = |sides: &BoxSides| {
            EdgeSizes::new(
                vertical(sides.up),
                horizontal(sides.right),
                vertical(sides.down),
                horizontal(sides.left),
            )
        };

        let padding = edges(node.padding());
        let computed = ComputedBox {
            width_px: horizontal(node.width()).max(0.0),
            height_px: vertical(node.height()).max(0.0),
            padding: EdgeSizes::new(
                padding.up.max(0.0),
                padding.right.max(0.0),
                padding.down.max(0.0),
                padding.left.max(0.0),
            ),
            margin: edges(node.margin()),
            pos_x_px: horizontal(node.pos_x()),
            pos_y_px: vertical(node.pos_y()),
            parent_width_px: parent_width,
            parent_height_px: parent_height,
            viewport,
        };
        let previous = *node.computed();
        node.set_computed(computed);

        if node.debug_outputs() && previous != computed {
            tracing::debug!(
                node = %id,
                width = computed.total_width(),
                height = computed.total_height(),
                "new size"
            );
        }
        self.resize_box(id, computed.total_width(), computed.total_height());
    }

    fn layout_children(&mut self, id: NodeId) {
        let Some(node) = self.boxes.get(id) else {
            return;
        };
        let computed = *node.computed();
        let behavior = node.overflow_behavior();
        let (content_host, bias) = node
            .content_viewport()
            .map_or((id, (0.0, 0.0)), |v| (v.node(), v.bias(behavior)));

        if content_host != id {
            self.tree.set_position(content_host, 0.0, 0.0);
            self.tree
                .set_size(content_host, computed.total_width(), computed.total_height());
        }

        #[cfg(feature = "layout-trace")]
        let depth = LAYOUT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });
        #[cfg(feature = "layout-trace")]
        eprintln!(
            "{:indent$}[LAYOUT] {id} content {}x{} scroll ({}, {})",
            "",
            computed.width_px,
            computed.height_px,
            bias.0,
            bias.1,
            indent = depth * 2
        );

        let padding = computed.padding;
        let mut cursor = FlowCursor::at_content_origin(&padding);
        let mut tracker =
            OverflowTracker::new(padding.left, padding.up, computed.width_px, computed.height_px);
        let mut placed = Vec::new();

        let children = self.tree.children(content_host).to_vec();
        for child in children {
            let was_placed = match self.classify(child) {
                Some(LayoutChild::Box(child)) => {
                    self.layout_box_child(id, child, &computed, &mut cursor, &mut tracker, bias)
                }
                Some(LayoutChild::Leaf(child)) => {
                    self.layout_leaf(child, &computed, &mut cursor, &mut tracker, bias);
                    true
                }
                None => {
                    self.resolve_nested(child);
                    false
                }
            };
            if was_placed {
                placed.push(child);
            }
        }

        let overflow = tracker.finish();
        let Some(node) = self.boxes.get_mut(id) else {
            return;
        };
        node.set_overflow(overflow);

        // The scroll range may have shrunk below the offsets used above.
        let settled = node
            .content_viewport()
            .map_or((0.0, 0.0), |v| v.bias(behavior));
        if settled != bias {
            let (dx, dy) = (bias.0 - settled.0, bias.1 - settled.1);
            for child in placed {
                if let Some(rect) = self.tree.rect(child) {
                    self.move_placed(child, rect.x + dx, rect.y + dy);
                }
            }
        }

        #[cfg(feature = "layout-trace")]
        LAYOUT_DEPTH.with(|d| d.set(depth));
    }

    /// Size, place and recurse into one child box. Returns whether it was
    /// placed; hidden boxes take no space and are skipped.
    fn layout_box_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        parent_computed: &ComputedBox,
        cursor: &mut FlowCursor,
        tracker: &mut OverflowTracker,
        bias: (f64, f64),
    ) -> bool {
        if let Some(node) = self.boxes.get_mut(child) {
            node.set_parent_link(ParentLink::Box(parent));
        }
        self.size_box(child, parent_computed.width_px, parent_computed.height_px);
        let Some(node) = self.boxes.get(child) else {
            return false;
        };
        if node.visibility() == Visibility::Hidden {
            return false;
        }
        let c = *node.computed();
        let position_type = node.position_type();

        let (x, y) = place_child(position_type, cursor, &c, &parent_computed.padding);
        tracker.observe(
            x - c.margin.left,
            y - c.margin.up,
            x + c.total_width() + c.margin.right,
            y + c.total_height() + c.margin.down,
        );

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[LAYOUT]   {child} {position_type:?} at ({x}, {y}) size {}x{}",
            c.total_width(),
            c.total_height()
        );

        self.move_box(child, x - bias.0, y - bias.1);
        self.layout_children(child);
        true
    }

    fn layout_leaf(
        &mut self,
        leaf: NodeId,
        parent_computed: &ComputedBox,
        cursor: &mut FlowCursor,
        tracker: &mut OverflowTracker,
        bias: (f64, f64),
    ) {
        let Some(rect) = self.tree.rect(leaf) else {
            return;
        };
        let anchored = self
            .tree
            .as_control(leaf)
            .is_some_and(|control| !control.anchors.is_zero());
        let (x, y) = (cursor.x, cursor.y);

        if anchored {
            let total_width = parent_computed.total_width();
            let total_height = parent_computed.total_height();
            let bounds = AnchorBounds::for_parent(
                &parent_computed.padding,
                total_width,
                total_height,
                self.anchor_band,
            );
            let Some(control) = self.tree.as_control_mut(leaf) else {
                return;
            };
            let (width, height) = apply_anchors(control, &bounds, total_width, total_height);
            self.tree.set_size(leaf, width, height);
            tracker.observe(x, y, x + width, y + height);
        } else {
            tracker.observe(x, y, x + rect.width, y + rect.height);
            cursor.advance(rect.height);
        }
        self.tree.set_position(leaf, x - bias.0, y - bias.1);
        self.resolve_nested(leaf);
    }

    /// Find boxes below a node that no box lays out and resolve them as
    /// self-positioned boxes.
    fn resolve_nested(&mut self, host: NodeId) {
        let children = self.tree.children(host).to_vec();
        for child in children {
            if self.carries_box(child) {
                self.resolve_box(child);
            } else {
                self.resolve_nested(child);
            }
        }
    }

    fn move_placed(&mut self, id: NodeId, x: f64, y: f64) {
        if self.boxes.contains(id) {
            self.move_box(id, x, y);
        } else {
            self.tree.set_position(id, x, y);
        }
    }

    fn move_box(&mut self, id: NodeId, x: f64, y: f64) {
        let Some(old) = self.tree.rect(id) else {
            return;
        };
        if old.x != x || old.y != y {
            self.tree.set_position(id, x, y);
            self.record(id, LayoutChangeReason::Position);
        }
    }

    fn resize_box(&mut self, id: NodeId, width: f64, height: f64) {
        let Some(old) = self.tree.rect(id) else {
            return;
        };
        if old.width != width {
            self.record(id, LayoutChangeReason::Width);
        }
        if old.height != height {
            self.record(id, LayoutChangeReason::Height);
        }
        self.tree.set_size(id, width, height);
    }

    fn record(&mut self, node: NodeId, reason: LayoutChangeReason) {
        let event = LayoutChangeEvent { node, reason };
        if !self.changes.contains(&event) {
            self.changes.push(event);
        }
    }
}
