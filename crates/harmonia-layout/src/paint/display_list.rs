//! A sequence of drawing commands.

use harmonia_dom::NodeId;

use crate::values::ColorValue;

/// A single drawing command. Coordinates are in window space.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Fill a box's padding rectangle with its background.
    FillRect {
        /// The box being painted.
        node: NodeId,
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
        /// Fill color.
        color: ColorValue,
    },

    /// Clip everything until the matching [`DisplayCommand::PopClip`] to
    /// the intersection of this rectangle and the clips already active.
    PushClip {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
    },

    /// Drop the most recent clip rectangle.
    PopClip,
}

/// Drawing commands in painting order, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// The commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether there are no commands.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
