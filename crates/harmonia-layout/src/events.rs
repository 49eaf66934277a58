//! Change notifications and the observer bus.
//!
//! Every geometry setter on a layout box records a [`LayoutChangeReason`].
//! The engine turns those into [`LayoutChangeEvent`]s and hands them to each
//! subscribed [`LayoutObserver`]. An observer may ask for another layout pass;
//! those requests are queued and drained by the engine after the current pass
//! finishes, never from inside it.

use std::fmt;

use harmonia_dom::NodeId;

/// Which group of properties changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutChangeReason {
    /// Declared or resolved width.
    Width,
    /// Declared or resolved height.
    Height,
    /// Position offsets, position type, or placed location.
    Position,
    /// Any margin side.
    Margin,
    /// Any padding side.
    Padding,
    /// Visibility mode.
    Visibility,
}

impl fmt::Display for LayoutChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Position => "position",
            Self::Margin => "margin",
            Self::Padding => "padding",
            Self::Visibility => "visibility",
        };
        f.write_str(name)
    }
}

/// A single notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutChangeEvent {
    /// The box whose geometry changed.
    pub node: NodeId,
    /// What changed.
    pub reason: LayoutChangeReason,
}

/// What an observer wants after seeing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reaction {
    /// Nothing further.
    #[default]
    Ignore,
    /// Run another layout pass rooted at the event's node.
    Relayout,
}

/// Receives layout change events.
///
/// Closures of the form `FnMut(&LayoutChangeEvent) -> Reaction` implement
/// this trait.
pub trait LayoutObserver {
    /// Called once per event, in emission order.
    fn on_layout_change(&mut self, event: &LayoutChangeEvent) -> Reaction;
}

impl<F> LayoutObserver for F
where
    F: FnMut(&LayoutChangeEvent) -> Reaction,
{
    fn on_layout_change(&mut self, event: &LayoutChangeEvent) -> Reaction {
        self(event)
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

/// Fan-out of change events to observers, plus the queue of relayout
/// requests they produced.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<(ObserverId, Box<dyn LayoutObserver>)>,
    next_id: usize,
    relayout_requests: Vec<NodeId>,
    emitted: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("relayout_requests", &self.relayout_requests)
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are called in subscription order.
    pub fn subscribe(&mut self, observer: impl LayoutObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Total events emitted over the bus's lifetime.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Deliver `event` to every observer and queue any relayout requests.
    pub fn emit(&mut self, event: LayoutChangeEvent) {
        self.emitted += 1;
        for (_, observer) in &mut self.observers {
            if observer.on_layout_change(&event) == Reaction::Relayout
                && !self.relayout_requests.contains(&event.node)
            {
                self.relayout_requests.push(event.node);
            }
        }
    }

    /// Take the queued relayout requests, leaving the queue empty.
    pub fn take_relayout_requests(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.relayout_requests)
    }

    /// Whether any relayout request is waiting.
    #[must_use]
    pub fn has_pending_relayout(&self) -> bool {
        !self.relayout_requests.is_empty()
    }
}
