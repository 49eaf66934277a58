//! Walks the scene tree and emits drawing commands for boxes.

use harmonia_dom::{NodeId, SceneTree};

use super::display_list::{DisplayCommand, DisplayList};
use crate::layout::{BoxArena, Visibility};

/// Produces a [`DisplayList`] from the current host rectangles.
///
/// Boxes paint their background over their padding rectangle, then their
/// children. Boxes that clip wrap their children in a clip pair. Leaf
/// controls are drawn by the host and produce no commands.
#[derive(Debug, Clone, Copy)]
pub struct Painter<'a> {
    tree: &'a SceneTree,
    boxes: &'a BoxArena,
}

impl<'a> Painter<'a> {
    /// Create a painter over a resolved tree.
    #[must_use]
    pub const fn new(tree: &'a SceneTree, boxes: &'a BoxArena) -> Self {
        Self { tree, boxes }
    }

    /// Paint everything attached to the window.
    #[must_use]
    pub fn paint(&self) -> DisplayList {
        let mut list = DisplayList::new();
        for &child in self.tree.children(NodeId::ROOT) {
            self.paint_node(child, (0.0, 0.0), &mut list);
        }
        list
    }

    fn paint_node(&self, id: NodeId, origin: (f64, f64), list: &mut DisplayList) {
        let Some(rect) = self.tree.rect(id) else {
            return;
        };
        let x = origin.0 + rect.x;
        let y = origin.1 + rect.y;

        let mut clipped = false;
        if let Some(node) = self.boxes.get(id) {
            match node.visibility() {
                Visibility::Hidden => return,
                Visibility::Visible if !node.background_color().is_transparent() => {
                    list.push(DisplayCommand::FillRect {
                        node: id,
                        x,
                        y,
                        width: rect.width,
                        height: rect.height,
                        color: node.background_color(),
                    });
                }
                Visibility::Visible | Visibility::Transparent => {}
            }
            if node.overflow_behavior().clips() && !self.tree.children(id).is_empty() {
                list.push(DisplayCommand::PushClip {
                    x,
                    y,
                    width: rect.width,
                    height: rect.height,
                });
                clipped = true;
            }
        }

        for &child in self.tree.children(id) {
            self.paint_node(child, (x, y), list);
        }
        if clipped {
            list.push(DisplayCommand::PopClip);
        }
    }
}
