use trestle_core::NodeId;
use trestle_geometry::{Point, Rect, Size};

/// Receives tree notifications synchronously, in the order they happen.
///
/// Every method defaults to doing nothing.
pub trait TreeObserver {
    /// Bounds of `node` were reassigned to a different rect.
    fn geometry_changed(&mut self, _node: NodeId, _old: Rect, _new: Rect) {}

    fn child_added(&mut self, _parent: NodeId, _child: NodeId) {}

    fn child_removed(&mut self, _parent: NodeId, _child: NodeId) {}

    fn resized(&mut self, _node: NodeId, _old: Size, _new: Size) {}

    fn moved(&mut self, _node: NodeId, _old: Point, _new: Point) {}

    /// Disposal of `node` started. Sent once, before any child is torn down.
    fn dispose_sent(&mut self, _node: NodeId) {}

    /// A layout strategy arranged the children of `node`.
    fn laid_out(&mut self, _node: NodeId, _flush: bool) {}
}
