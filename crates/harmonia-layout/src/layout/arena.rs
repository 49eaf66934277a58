//! Storage for layout boxes, indexed by scene node id.

use harmonia_dom::NodeId;

use super::box_node::BoxNode;

/// Layout boxes keyed by the id of the container they belong to.
///
/// Slots line up with scene node indices, so lookups are O(1) and parents
/// and children refer to each other by id only.
#[derive(Debug, Clone, Default)]
pub struct BoxArena {
    slots: Vec<Option<BoxNode>>,
}

impl BoxArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a box to `id`, returning any box it replaces.
    pub fn insert(&mut self, id: NodeId, node: BoxNode) -> Option<BoxNode> {
        if self.slots.len() <= id.0 {
            self.slots.resize_with(id.0 + 1, || None);
        }
        self.slots[id.0].replace(node)
    }

    /// Detach the box from `id`.
    pub fn remove(&mut self, id: NodeId) -> Option<BoxNode> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    /// The box attached to `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&BoxNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access to the box attached to `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut BoxNode> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Whether `id` carries a box.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether there are no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids with a box, ascending.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| NodeId(index))
    }
}
