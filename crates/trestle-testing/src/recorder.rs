use std::cell::RefCell;
use std::rc::Rc;

use trestle_ui::{NodeId, Point, Rect, Size, TreeObserver};

/// One observer callback, as recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    GeometryChanged { node: NodeId, old: Rect, new: Rect },
    ChildAdded { parent: NodeId, child: NodeId },
    ChildRemoved { parent: NodeId, child: NodeId },
    Resized { node: NodeId, old: Size, new: Size },
    Moved { node: NodeId, old: Point, new: Point },
    DisposeSent { node: NodeId },
    LaidOut { node: NodeId, flush: bool },
}

/// An observer that keeps every event in order.
///
/// Clones share the same log, so one clone can be registered with the tree
/// while the test inspects another.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<TreeEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TreeEvent> {
        self.events.borrow().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn take(&self) -> Vec<TreeEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Containers whose strategy ran, in order.
    pub fn laid_out(&self) -> Vec<NodeId> {
        self.filter(|event| match event {
            TreeEvent::LaidOut { node, .. } => Some(*node),
            _ => None,
        })
    }

    pub fn laid_out_count(&self, node: NodeId) -> usize {
        self.laid_out().into_iter().filter(|&id| id == node).count()
    }

    /// Nodes that received the dispose notification, in order.
    pub fn dispose_sent(&self) -> Vec<NodeId> {
        self.filter(|event| match event {
            TreeEvent::DisposeSent { node } => Some(*node),
            _ => None,
        })
    }

    /// Nodes whose bounds changed, in order, with their new bounds.
    pub fn geometry_changes(&self) -> Vec<(NodeId, Rect)> {
        self.filter(|event| match event {
            TreeEvent::GeometryChanged { node, new, .. } => Some((*node, *new)),
            _ => None,
        })
    }

    fn filter<T>(&self, select: impl FnMut(&TreeEvent) -> Option<T>) -> Vec<T> {
        self.events.borrow().iter().filter_map(select).collect()
    }

    fn push(&self, event: TreeEvent) {
        log::trace!("recorded {event:?}");
        self.events.borrow_mut().push(event);
    }
}

impl TreeObserver for EventRecorder {
    fn geometry_changed(&mut self, node: NodeId, old: Rect, new: Rect) {
        self.push(TreeEvent::GeometryChanged { node, old, new });
    }

    fn child_added(&mut self, parent: NodeId, child: NodeId) {
        self.push(TreeEvent::ChildAdded { parent, child });
    }

    fn child_removed(&mut self, parent: NodeId, child: NodeId) {
        self.push(TreeEvent::ChildRemoved { parent, child });
    }

    fn resized(&mut self, node: NodeId, old: Size, new: Size) {
        self.push(TreeEvent::Resized { node, old, new });
    }

    fn moved(&mut self, node: NodeId, old: Point, new: Point) {
        self.push(TreeEvent::Moved { node, old, new });
    }

    fn dispose_sent(&mut self, node: NodeId) {
        self.push(TreeEvent::DisposeSent { node });
    }

    fn laid_out(&mut self, node: NodeId, flush: bool) {
        self.push(TreeEvent::LaidOut { node, flush });
    }
}
