//! Host scene tree for the Harmonia layout engine.
//!
//! The layout engine does not own a UI framework; it consumes a tree of host
//! visuals. This crate is that tree: an arena of nodes where every node has
//! a host rectangle (position relative to its host parent, plus size) and a
//! kind that tells the layout engine how to treat it.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Nodes are never freed; detached nodes simply stop being reachable
//! from [`NodeId::ROOT`].

/// A type-safe index into the scene tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The window node is always at index 0.
    pub const ROOT: Self = Self(0);
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rectangle in host coordinates.
///
/// `x`/`y` are relative to the host parent's origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f64,
    /// Vertical position of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from position and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Four per-side values in host order: left, top, right, bottom.
///
/// Used for a control's anchor fractions and its pixel offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeValues {
    /// Left edge value.
    pub left: f64,
    /// Top edge value.
    pub top: f64,
    /// Right edge value.
    pub right: f64,
    /// Bottom edge value.
    pub bottom: f64,
}

impl EdgeValues {
    /// Create edge values from the four sides.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// True if every side is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

/// A generic host control: a leaf visual that is not a layout box.
///
/// Controls are positioned by their host parent using anchors (fractions of
/// the parent's size) and offsets (pixels added to the anchored edges).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlData {
    /// Anchor fractions, each normally in `[0, 1]`.
    pub anchors: EdgeValues,
    /// Pixel offsets applied to the anchored edges.
    pub offsets: EdgeValues,
}

/// The kind of a scene node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    /// The window. Always the root at [`NodeId::ROOT`].
    Window,
    /// A host element that carries a layout box.
    Container,
    /// A generic leaf visual.
    Control(ControlData),
    /// The scrollable content wrapper of a container.
    ContentViewport,
}

/// A node in the scene tree.
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is.
    pub node_type: NodeType,

    /// Human-readable name, used for lookups and debug output.
    pub name: String,

    /// Host rectangle. Position is relative to the host parent.
    pub rect: Rect,

    /// Parent node, `None` for the window and for detached nodes.
    pub parent: Option<NodeId>,

    /// Children in structural (layout) order.
    pub children: Vec<NodeId>,

    /// The node immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

/// Arena-based scene tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct SceneTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The window node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl SceneTree {
    /// Create a new scene tree with just a window of the given size.
    #[must_use]
    pub fn new(window_width: f64, window_height: f64) -> Self {
        let window = Node {
            node_type: NodeType::Window,
            name: "window".to_string(),
            rect: Rect::new(0.0, 0.0, window_width, window_height),
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Self {
            nodes: vec![window],
        }
    }

    /// Get the window node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (should always hold at least the window).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            name: name.to_string(),
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    ///
    /// If `child` is already attached somewhere it is detached first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child).is_some() {
            self.detach(child);
        }

        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Inserts `child` into `parent`'s children immediately before `reference`.
    ///
    /// If `reference` is not a child of `parent`, `child` is appended instead.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        if self.parent(child).is_some() {
            self.detach(child);
        }

        let Some(index) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == reference)
        else {
            self.append_child(parent, child);
            return;
        };

        let prev = self.nodes[reference.0].prev_sibling;
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].prev_sibling = prev;
        self.nodes[child.0].next_sibling = Some(reference);
        self.nodes[reference.0].prev_sibling = Some(child);
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }
    }

    /// Removes `child` from `parent`'s children.
    ///
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) == Some(parent) {
            self.detach(child);
        }
    }

    /// Unlink a node from its current parent and siblings.
    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent else {
            return;
        };
        let prev = self.nodes[child.0].prev_sibling;
        let next = self.nodes[child.0].next_sibling;

        self.nodes[parent.0].children.retain(|&id| id != child);
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }

        let node = &mut self.nodes[child.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over a node and all its descendants in pre-order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: vec![id],
        }
    }

    /// Get the kind of a node.
    #[must_use]
    pub fn node_type(&self, id: NodeId) -> Option<&NodeType> {
        self.get(id).map(|n| &n.node_type)
    }

    /// True if the node is a container (carries a layout box).
    #[must_use]
    pub fn is_container(&self, id: NodeId) -> bool {
        matches!(self.node_type(id), Some(NodeType::Container))
    }

    /// True if the node is a container's content viewport wrapper.
    #[must_use]
    pub fn is_content_viewport(&self, id: NodeId) -> bool {
        matches!(self.node_type(id), Some(NodeType::ContentViewport))
    }

    /// Get control data if this node is a control.
    #[must_use]
    pub fn as_control(&self, id: NodeId) -> Option<&ControlData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Control(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable control data if this node is a control.
    pub fn as_control_mut(&mut self, id: NodeId) -> Option<&mut ControlData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Control(data) => Some(data),
            _ => None,
        })
    }

    /// Get the host rectangle of a node.
    #[must_use]
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.get(id).map(|n| n.rect)
    }

    /// Set the host position of a node (relative to its parent).
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(node) = self.get_mut(id) {
            node.rect.x = x;
            node.rect.y = y;
        }
    }

    /// Set the host size of a node.
    pub fn set_size(&mut self, id: NodeId, width: f64, height: f64) {
        if let Some(node) = self.get_mut(id) {
            node.rect.width = width;
            node.rect.height = height;
        }
    }

    /// Position of a node in window coordinates (sum of host positions).
    #[must_use]
    pub fn absolute_position(&self, id: NodeId) -> (f64, f64) {
        let own = self.rect(id).unwrap_or_default();
        self.ancestors(id)
            .filter_map(|a| self.rect(a))
            .fold((own.x, own.y), |(x, y), r| (x + r.x, y + r.y))
    }

    /// Find the first attached node with the given name, in pre-order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .find(|&id| self.get(id).is_some_and(|n| n.name == name))
    }
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a SceneTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a node and its descendants.
pub struct DescendantIterator<'a> {
    tree: &'a SceneTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
