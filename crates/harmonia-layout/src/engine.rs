//! The layout engine: scene, boxes, observers and the update cycle.
//!
//! [`LayoutEngine`] owns the host scene tree and one [`BoxNode`] per
//! container. It runs layout passes when the periodic tick interval elapses,
//! when the viewport is resized, and after a box setter records a change.
//!
//! ```
//! use harmonia_dom::NodeId;
//! use harmonia_layout::{EngineConfig, LayoutEngine};
//!
//! let mut engine = LayoutEngine::new(EngineConfig::default());
//! let panel = engine.add_box(NodeId::ROOT, "panel").unwrap();
//! engine.try_edit(panel, |b| b.set_width_str("50%")).unwrap();
//! assert_eq!(engine.box_node(panel).unwrap().width_px(), 576.0);
//! ```

use harmonia_dom::{ControlData, NodeId, NodeType, Rect, SceneTree};

use crate::config::EngineConfig;
use crate::convert::ViewportContext;
use crate::error::{LayoutError, ParseError};
use crate::events::{EventBus, LayoutChangeEvent, LayoutObserver, ObserverId};
use crate::layout::{BoxArena, BoxNode, ContentViewport, ParentLink, Resolver, ScrollDirection};
use crate::paint::{DisplayList, Painter};

/// Owns a scene and keeps its layout current.
#[derive(Debug)]
pub struct LayoutEngine {
    tree: SceneTree,
    boxes: BoxArena,
    bus: EventBus,
    config: EngineConfig,
    viewport: ViewportContext,
    update_time: f64,
    redraw_queue: Vec<NodeId>,
    passes: u64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LayoutEngine {
    /// Create an engine with an empty window sized to the configured viewport.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let viewport = config.viewport();
        Self {
            tree: SceneTree::new(viewport.width, viewport.height),
            boxes: BoxArena::new(),
            bus: EventBus::new(),
            config,
            viewport,
            update_time: 0.0,
            redraw_queue: Vec::new(),
            passes: 0,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current viewport.
    #[must_use]
    pub const fn viewport(&self) -> ViewportContext {
        self.viewport
    }

    /// The host scene tree.
    #[must_use]
    pub const fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// All layout boxes.
    #[must_use]
    pub const fn boxes(&self) -> &BoxArena {
        &self.boxes
    }

    /// Number of layout passes run so far.
    #[must_use]
    pub const fn pass_count(&self) -> u64 {
        self.passes
    }

    /// The box attached to `id`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] or [`LayoutError::NotABox`].
    pub fn box_node(&self, id: NodeId) -> Result<&BoxNode, LayoutError> {
        self.boxes.get(id).ok_or_else(|| missing_box(&self.tree, id))
    }

    /// Host rectangle of any node.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] if `id` does not exist.
    pub fn rect(&self, id: NodeId) -> Result<Rect, LayoutError> {
        self.tree.rect(id).ok_or(LayoutError::UnknownNode(id))
    }

    // --- scene building ---

    /// Create a container with a layout box as the last child of `parent`.
    ///
    /// When `parent` scrolls, the box goes into its content viewport.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] if `parent` does not exist.
    pub fn add_box(&mut self, parent: NodeId, name: &str) -> Result<NodeId, LayoutError> {
        let id = self.add_node(parent, NodeType::Container, name)?;
        let mut node = BoxNode::new();
        node.set_debug_outputs(self.config.debug_outputs);
        let _ = self.boxes.insert(id, node);
        Ok(id)
    }

    /// Create a leaf control of the given size as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] if `parent` does not exist.
    pub fn add_control(
        &mut self,
        parent: NodeId,
        name: &str,
        data: ControlData,
        width: f64,
        height: f64,
    ) -> Result<NodeId, LayoutError> {
        let id = self.add_node(parent, NodeType::Control(data), name)?;
        self.tree.set_size(id, width, height);
        Ok(id)
    }

    /// Create a scene node of any kind without a box.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] if `parent` does not exist.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        node_type: NodeType,
        name: &str,
    ) -> Result<NodeId, LayoutError> {
        let host = self.content_host(parent)?;
        let id = self.tree.alloc(node_type, name);
        self.tree.append_child(host, id);
        Ok(id)
    }

    /// Move `child` (and its subtree) to the end of `parent`'s children.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] if either node does not exist.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        if self.tree.get(child).is_none() {
            return Err(LayoutError::UnknownNode(child));
        }
        let host = self.content_host(parent)?;
        self.tree.append_child(host, child);
        self.invalidate_parent_links(child);
        Ok(())
    }

    /// Detach `id` from its parent. The subtree keeps its boxes and can be
    /// attached again.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] if `id` does not exist.
    pub fn detach(&mut self, id: NodeId) -> Result<(), LayoutError> {
        if self.tree.get(id).is_none() {
            return Err(LayoutError::UnknownNode(id));
        }
        if let Some(parent) = self.tree.parent(id) {
            self.tree.remove_child(parent, id);
        }
        self.invalidate_parent_links(id);
        Ok(())
    }

    /// Give box `id` a content viewport so its children can scroll, and
    /// choose which scrollbars it shows. Existing children move into the
    /// viewport. Calling this again only changes the scrollbars.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] or [`LayoutError::NotABox`].
    pub fn enable_scrolling(
        &mut self,
        id: NodeId,
        horizontal_bar: bool,
        vertical_bar: bool,
    ) -> Result<NodeId, LayoutError> {
        let Some(node) = self.boxes.get_mut(id) else {
            return Err(missing_box(&self.tree, id));
        };
        if let Some(viewport) = node.content_viewport_mut() {
            viewport.set_scrollbars(horizontal_bar, vertical_bar);
            return Ok(viewport.node());
        }

        let name = self
            .tree
            .get(id)
            .map(|n| format!("{}-content", n.name))
            .unwrap_or_default();
        let wrapper = self.tree.alloc(NodeType::ContentViewport, &name);
        for child in self.tree.children(id).to_vec() {
            self.tree.append_child(wrapper, child);
        }
        self.tree.append_child(id, wrapper);

        let mut viewport = ContentViewport::new(wrapper);
        viewport.set_scrollbars(horizontal_bar, vertical_bar);
        if let Some(node) = self.boxes.get_mut(id) {
            node.set_content_viewport(viewport);
        }
        tracing::debug!(node = %id, %wrapper, "content viewport created");
        Ok(wrapper)
    }

    // --- editing ---

    /// Run `f` on the box at `id`, then deliver the changes it recorded.
    ///
    /// Each recorded reason becomes one [`LayoutChangeEvent`]. If anything
    /// changed and `relayout_on_change` is set, the box's layout root is
    /// resolved before observer requests are drained.
    ///
    /// # Errors
    ///
    /// Fails if `id` has no box, or if observers keep requesting relayouts.
    pub fn edit<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut BoxNode) -> R,
    ) -> Result<R, LayoutError> {
        let Some(node) = self.boxes.get_mut(id) else {
            return Err(missing_box(&self.tree, id));
        };
        let result = f(node);
        let changes = node.take_changes();
        if node.take_redraw_request() {
            self.queue_redraw(id);
        }

        for reason in &changes {
            self.bus.emit(LayoutChangeEvent {
                node: id,
                reason: *reason,
            });
        }
        if !changes.is_empty()
            && self.config.relayout_on_change
            && self.tree.is_descendant_of(id, NodeId::ROOT)
        {
            self.run_pass(Some(id))?;
        }
        self.settle()?;
        Ok(result)
    }

    /// [`LayoutEngine::edit`] for setters that parse strings.
    ///
    /// # Errors
    ///
    /// Parse errors come back as [`LayoutError::Parse`], in which case the
    /// box is unchanged.
    pub fn try_edit(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut BoxNode) -> Result<(), ParseError>,
    ) -> Result<(), LayoutError> {
        self.edit(id, f)?.map_err(LayoutError::from)
    }

    // --- observers ---

    /// Register an observer for layout change events.
    pub fn subscribe(&mut self, observer: impl LayoutObserver + 'static) -> ObserverId {
        self.bus.subscribe(observer)
    }

    /// Remove an observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Total events delivered so far.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.bus.emitted()
    }

    // --- update cycle ---

    /// Resolve every root box now.
    ///
    /// # Errors
    ///
    /// [`LayoutError::RelayoutLimit`] if observers do not settle.
    pub fn resolve_all(&mut self) -> Result<(), LayoutError> {
        self.run_pass(None)?;
        self.settle()
    }

    /// Resolve the layout root containing `id`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::NotABox`] if `id` has no box, or
    /// [`LayoutError::RelayoutLimit`] if observers do not settle.
    pub fn resolve(&mut self, id: NodeId) -> Result<(), LayoutError> {
        if !self.boxes.contains(id) {
            return Err(missing_box(&self.tree, id));
        }
        self.run_pass(Some(id))?;
        self.settle()
    }

    /// Advance the periodic update timer. Returns whether a pass ran.
    ///
    /// Time accumulates across calls; once it reaches the configured
    /// interval one interval is consumed and every root is resolved.
    ///
    /// # Errors
    ///
    /// As [`LayoutEngine::resolve_all`].
    pub fn tick(&mut self, delta_secs: f64) -> Result<bool, LayoutError> {
        self.update_time += delta_secs;
        let interval = self.config.update_interval_secs;
        if self.update_time < interval {
            return Ok(false);
        }
        self.update_time -= interval.max(0.0);
        self.resolve_all()?;
        Ok(true)
    }

    /// Adopt a new viewport size and resolve every root immediately.
    ///
    /// # Errors
    ///
    /// As [`LayoutEngine::resolve_all`].
    pub fn on_viewport_resized(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        tracing::debug!(width, height, "viewport resized");
        self.viewport = ViewportContext::new(width, height);
        self.tree.set_size(NodeId::ROOT, width, height);
        self.resolve_all()
    }

    // --- scrolling ---

    /// Scroll box `id` by one wheel step. Returns whether it moved; boxes
    /// without a content viewport never move.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] or [`LayoutError::NotABox`].
    pub fn scroll(&mut self, id: NodeId, direction: ScrollDirection) -> Result<bool, LayoutError> {
        let viewport = self.viewport;
        let Some(node) = self.boxes.get_mut(id) else {
            return Err(missing_box(&self.tree, id));
        };
        let (width, height) = (node.width_px(), node.height_px());
        let moved = node
            .content_viewport_mut()
            .is_some_and(|v| v.scroll_step(direction, width, height, viewport));
        if moved {
            self.scrolled(id)?;
        }
        Ok(moved)
    }

    /// Set box `id`'s scroll offsets, clamped to its scroll range.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] or [`LayoutError::NotABox`].
    pub fn set_scroll(&mut self, id: NodeId, left: f64, top: f64) -> Result<(), LayoutError> {
        let Some(node) = self.boxes.get_mut(id) else {
            return Err(missing_box(&self.tree, id));
        };
        let Some(viewport) = node.content_viewport_mut() else {
            return Ok(());
        };
        let before = (viewport.scroll_left(), viewport.scroll_top());
        viewport.set_scroll_left(left);
        viewport.set_scroll_top(top);
        if before != (viewport.scroll_left(), viewport.scroll_top()) {
            self.scrolled(id)?;
        }
        Ok(())
    }

    // --- output ---

    /// Paint the current geometry.
    #[must_use]
    pub fn paint(&self) -> DisplayList {
        Painter::new(&self.tree, &self.boxes).paint()
    }

    /// Boxes that need repainting since the last call, in request order.
    pub fn take_redraw_requests(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.redraw_queue)
    }

    // --- internals ---

    fn scrolled(&mut self, id: NodeId) -> Result<(), LayoutError> {
        self.queue_redraw(id);
        self.run_pass(Some(id))?;
        self.settle()
    }

    /// Where new children of `parent` go: its content viewport if it has one.
    fn content_host(&self, parent: NodeId) -> Result<NodeId, LayoutError> {
        if self.tree.get(parent).is_none() {
            return Err(LayoutError::UnknownNode(parent));
        }
        Ok(self
            .boxes
            .get(parent)
            .and_then(BoxNode::content_viewport)
            .map_or(parent, ContentViewport::node))
    }

    fn invalidate_parent_links(&mut self, id: NodeId) {
        for node in self.tree.descendants(id) {
            if let Some(node) = self.boxes.get_mut(node) {
                node.set_parent_link(ParentLink::Unresolved);
            }
        }
    }

    fn queue_redraw(&mut self, id: NodeId) {
        if !self.redraw_queue.contains(&id) {
            self.redraw_queue.push(id);
        }
    }

    /// Run one pass, over everything or over the layout root of `target`,
    /// and deliver the geometry changes it produced.
    fn run_pass(&mut self, target: Option<NodeId>) -> Result<(), LayoutError> {
        let changes = {
            let mut resolver = Resolver::new(
                &mut self.tree,
                &mut self.boxes,
                self.viewport,
                self.config.anchor_band,
            );
            match target {
                Some(id) => {
                    let root = resolver.layout_root(id);
                    resolver.resolve(root)?;
                }
                None => resolver.resolve_all(),
            }
            resolver.into_changes()
        };
        self.passes += 1;
        tracing::trace!(pass = self.passes, changes = changes.len(), "layout pass");

        for event in changes {
            self.queue_redraw(event.node);
            self.bus.emit(event);
        }
        Ok(())
    }

    /// Drain relayout requests made by observers, one round at a time,
    /// until none are left or the round limit is hit.
    fn settle(&mut self) -> Result<(), LayoutError> {
        let limit = self.config.max_relayout_passes;
        let mut rounds = 0;
        while self.bus.has_pending_relayout() {
            let requests = self.bus.take_relayout_requests();
            if rounds == limit {
                tracing::warn!(limit, pending = requests.len(), "relayout requests did not settle");
                return Err(LayoutError::RelayoutLimit(limit));
            }
            rounds += 1;

            let mut roots = Vec::new();
            for id in requests {
                if !self.boxes.contains(id) {
                    continue;
                }
                let root = Resolver::new(
                    &mut self.tree,
                    &mut self.boxes,
                    self.viewport,
                    self.config.anchor_band,
                )
                .layout_root(id);
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
            for root in roots {
                self.run_pass(Some(root))?;
            }
        }
        Ok(())
    }
}

fn missing_box(tree: &SceneTree, id: NodeId) -> LayoutError {
    if tree.get(id).is_some() {
        LayoutError::NotABox(id)
    } else {
        LayoutError::UnknownNode(id)
    }
}
