//! Contracts between the layout engine and layout strategies.

use trestle_core::{NodeId, TreeResult};
use trestle_geometry::{Rect, Size};

use crate::SizeHint;

/// The view of a container a strategy works against.
///
/// Only direct children that take part in layout are exposed. Disposed and
/// hidden children never show up here.
pub trait LayoutContainer {
    fn node_id(&self) -> NodeId;

    /// Participating children in paint order.
    fn children(&self) -> &[NodeId];

    /// The container's bounds minus its trim, in the container's coordinates.
    fn client_area(&self) -> Rect;

    /// Preferred size of a child for the given hints.
    fn measure_child(
        &mut self,
        child: NodeId,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size>;

    /// Assigns the bounds of a child, relative to the container's origin.
    fn place_child(&mut self, child: NodeId, bounds: Rect) -> TreeResult<()>;
}

/// Computes a container's preferred size and the bounds of its children.
///
/// Strategies hold no tree state. Any cache they keep is keyed by child id and
/// must be flushable child by child.
pub trait LayoutStrategy {
    /// Preferred size of the client area for the given client hints.
    fn measure(
        &mut self,
        container: &mut dyn LayoutContainer,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size>;

    /// Places every participating child inside the client area.
    fn arrange(&mut self, container: &mut dyn LayoutContainer, flush: bool) -> TreeResult<()>;

    /// Drops the cached data for `child`; `true` when something was cached.
    fn flush_cache(&mut self, _child: NodeId) -> bool {
        false
    }

    /// Human-readable name used in errors and logs.
    fn debug_name(&self) -> &str;
}
