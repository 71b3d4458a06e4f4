//! Measure and arrange glue between the tree and layout strategies.
//!
//! A pass over a container clears its dirty bits before the strategy runs,
//! hands the strategy a [`LayoutContainer`] view of the participating
//! children, and afterwards cascades into the children that were resized or
//! are still marked. Every entry point goes through [`WidgetTree::update_layout`],
//! which turns the work into `LAYOUT_CHILD` breadcrumbs instead when a
//! suspended node sits on the path to the root.

use bitflags::bitflags;
use smallvec::SmallVec;
use trestle_core::{deferral, dirty, NodeFlags, NodeId, Resumed, TreeError, TreeResult};
use trestle_geometry::{Point, Rect, Size};
use trestle_layout::{LayoutContainer, SizeHint};

use crate::widget::IntrinsicMemo;
use crate::WidgetTree;

bitflags! {
    /// Options of a [`LayoutRequest`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayoutFlags: u8 {
        /// Lay out the whole subtree, not just the named nodes' ancestors.
        const ALL = 1 << 0;
        /// Cached child sizes are stale.
        const CHANGED = 1 << 1;
        /// Only record the request; run it from `run_deferred_layouts`.
        const DEFER = 1 << 2;
    }
}

/// A layout request against one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutRequest {
    pub targets: Vec<NodeId>,
    pub flags: LayoutFlags,
}

impl LayoutRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-layout only the ancestor chains of `targets`.
    pub fn targets(targets: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            flags: LayoutFlags::empty(),
        }
    }

    pub fn flags(mut self, flags: LayoutFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// The strategy's view of one container during a pass.
struct TreeLayoutContext<'a> {
    tree: &'a mut WidgetTree,
    node: NodeId,
    children: SmallVec<[NodeId; 8]>,
    client: Rect,
}

impl<'a> TreeLayoutContext<'a> {
    fn new(tree: &'a mut WidgetTree, node: NodeId) -> TreeResult<Self> {
        let children = tree.participating_children(node)?.into_iter().collect();
        let trim = tree.effective_trim(node)?;
        let client = tree.widget(node)?.client_area_with(trim);
        Ok(Self {
            tree,
            node,
            children,
            client,
        })
    }
}

impl LayoutContainer for TreeLayoutContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn client_area(&self) -> Rect {
        self.client
    }

    fn measure_child(
        &mut self,
        child: NodeId,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        if !self.children.contains(&child) {
            return Err(TreeError::InvalidParent {
                node: child,
                container: self.node,
            });
        }
        self.tree.measure_node(child, width, height, flush)
    }

    fn place_child(&mut self, child: NodeId, bounds: Rect) -> TreeResult<()> {
        if !self.children.contains(&child) {
            return Err(TreeError::InvalidParent {
                node: child,
                container: self.node,
            });
        }
        self.tree.assign_bounds(child, bounds)?;
        Ok(())
    }
}

impl WidgetTree {
    /// Preferred size of `id` for the given hints.
    ///
    /// An exact hint is echoed on its axis. With both hints exact nothing is
    /// measured at all.
    pub fn measure(
        &mut self,
        id: NodeId,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        self.check_thread()?;
        let width = width.validate("width")?;
        let height = height.validate("height")?;
        self.measure_node(id, width, height, flush)
    }

    /// Runs the pending arrangement of `id`, if any.
    ///
    /// Returns `false` when there was nothing to do or the node is suspended.
    pub fn arrange(&mut self, id: NodeId, flush: bool) -> TreeResult<bool> {
        self.check_thread()?;
        if !self.widget(id)?.is_container() {
            return Ok(false);
        }
        if let Some(scope) = deferral::find_deferred(&self.arena, id) {
            if self.arena.flags(id)?.is_layout_needed() {
                dirty::mark_deferred_child(&mut self.arena, id, scope)?;
            }
            return Ok(false);
        }
        self.arrange_node(id, flush)
    }

    /// Marks `id` (and with `all` every descendant container) for layout and
    /// lays it out.
    pub fn layout(&mut self, id: NodeId, changed: bool, all: bool) -> TreeResult<()> {
        self.check_thread()?;
        let widget = self.require_container(id)?;
        if !all && widget.capabilities.layout().is_none() {
            return Ok(());
        }
        dirty::mark_layout(&mut self.arena, id, changed, all)?;
        self.update_layout(id, all)
    }

    /// Re-lays out only the ancestors of `targets` below `container`.
    pub fn layout_nodes(&mut self, container: NodeId, targets: &[NodeId]) -> TreeResult<()> {
        self.check_thread()?;
        self.require_container(container)?;
        let update = dirty::mark_ancestor_paths(&mut self.arena, container, targets)?;
        for id in update {
            self.update_layout(id, false)?;
        }
        Ok(())
    }

    /// General form of [`layout`](Self::layout) and
    /// [`layout_nodes`](Self::layout_nodes).
    pub fn layout_with(&mut self, container: NodeId, request: LayoutRequest) -> TreeResult<()> {
        self.check_thread()?;
        self.require_container(container)?;
        let changed = request.flags.contains(LayoutFlags::CHANGED);
        let all = request.flags.contains(LayoutFlags::ALL);

        let mut update = Vec::new();
        if request.targets.is_empty() {
            dirty::mark_layout(&mut self.arena, container, changed, all)?;
            update.push(container);
        } else {
            update = dirty::mark_ancestor_paths(&mut self.arena, container, &request.targets)?;
            for &target in &request.targets {
                if self.widget(target)?.is_container() {
                    dirty::mark_layout(&mut self.arena, target, changed, all)?;
                    update.push(target);
                }
            }
        }

        if request.flags.contains(LayoutFlags::DEFER) {
            deferral::suspend(&mut self.arena, container)?;
            self.deferred_layouts.push(container);
            log::debug!("layout of node {container} deferred");
        }
        for id in update {
            self.update_layout(id, all)?;
        }
        Ok(())
    }

    /// Queues a re-layout of `id` from its root, run by
    /// [`run_deferred_layouts`](Self::run_deferred_layouts).
    pub fn request_layout(&mut self, id: NodeId) -> TreeResult<()> {
        self.check_thread()?;
        self.arena.live(id)?;
        let root = self.arena.root_of(id)?;
        let request = if root == id {
            LayoutRequest::new()
        } else {
            LayoutRequest::targets([id])
        };
        self.layout_with(root, request.flags(LayoutFlags::DEFER))
    }

    /// Resumes every container a deferred request suspended.
    ///
    /// Returns how many containers were resumed.
    pub fn run_deferred_layouts(&mut self) -> TreeResult<usize> {
        self.check_thread()?;
        let pending = std::mem::take(&mut self.deferred_layouts);
        let mut resumed = 0;
        for id in pending {
            if !self.arena.flags(id)?.is_live() {
                continue;
            }
            self.resume(id)?;
            resumed += 1;
        }
        Ok(resumed)
    }

    /// Suppresses layout of `id` and its subtree until the matching
    /// [`resume`](Self::resume). Returns the new depth.
    pub fn suspend(&mut self, id: NodeId) -> TreeResult<u32> {
        self.check_thread()?;
        deferral::suspend(&mut self.arena, id)
    }

    /// Closes one suspension level. The last one flushes pending work once.
    pub fn resume(&mut self, id: NodeId) -> TreeResult<Resumed> {
        self.check_thread()?;
        let resumed = deferral::resume(&mut self.arena, id)?;
        if resumed == Resumed::Flush {
            log::debug!("flushing deferred layout under node {id}");
            self.update_layout(id, true)?;
        }
        Ok(resumed)
    }

    /// Runs `body` with layout of `id` suspended.
    ///
    /// The suspension is closed even when `body` fails; the body's error wins.
    pub fn with_layout_deferred<R>(
        &mut self,
        id: NodeId,
        body: impl FnOnce(&mut Self) -> TreeResult<R>,
    ) -> TreeResult<R> {
        self.suspend(id)?;
        let result = body(self);
        let resumed = self.resume(id);
        let value = result?;
        resumed?;
        Ok(value)
    }

    /// Resizes `id` to its preferred size.
    pub fn pack(&mut self, id: NodeId, changed: bool) -> TreeResult<Size> {
        self.check_thread()?;
        let size = self.measure_node(id, SizeHint::Unconstrained, SizeHint::Unconstrained, changed)?;
        self.set_size(id, size)?;
        Ok(size)
    }

    /// Lays `id` out now or, when suspended, records that it has to be.
    ///
    /// With `all`, descends into every child that is marked or has marked
    /// descendants.
    pub(crate) fn update_layout(&mut self, id: NodeId, all: bool) -> TreeResult<()> {
        if let Some(scope) = deferral::find_deferred(&self.arena, id) {
            return dirty::mark_deferred_child(&mut self.arena, id, scope);
        }
        self.arrange_node(id, false)?;
        if !all {
            return Ok(());
        }
        self.arena.remove_flags(id, NodeFlags::LAYOUT_CHILD)?;
        for child in self.arena.child_ids(id)? {
            let Ok(node) = self.arena.live(child) else {
                continue;
            };
            if node.value().is_container() && node.flags().needs_visit() {
                self.update_layout(child, true)?;
            }
        }
        Ok(())
    }

    pub(crate) fn arrange_node(&mut self, id: NodeId, flush: bool) -> TreeResult<bool> {
        let node = self.arena.live(id)?;
        if !node.value().is_container() || !node.flags().is_layout_needed() {
            return Ok(false);
        }
        self.ensure_skin(id)?;
        let changed = dirty::take_layout_flags(&mut self.arena, id)?.unwrap_or(false);
        let flush = flush || changed;

        if let Some(mut strategy) = self.widget_mut(id)?.capabilities.take_layout() {
            log::trace!("arranging node {id} with {} (flush: {flush})", strategy.debug_name());
            let result = TreeLayoutContext::new(self, id)
                .and_then(|mut context| strategy.arrange(&mut context, flush));
            if let Ok(widget) = self.widget_mut(id) {
                widget.capabilities.restore_layout(strategy);
            }
            result?;
            self.notify(|observer| observer.laid_out(id, flush));
        }

        for child in self.participating_children(id)? {
            let node = self.arena.live(child)?;
            if node.value().is_container() && node.flags().is_layout_needed() {
                self.update_layout(child, false)?;
            }
        }
        Ok(true)
    }

    pub(crate) fn measure_node(
        &mut self,
        id: NodeId,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        self.arena.live(id)?;
        if let (SizeHint::Exact(w), SizeHint::Exact(h)) = (width, height) {
            return Ok(Size::new(w, h));
        }
        self.ensure_skin(id)?;
        let flags = self.arena.flags(id)?;
        let widget = self.widget(id)?;
        let trim = widget.trim;
        let client_width = width.shrink(trim.horizontal_sum());
        let client_height = height.shrink(trim.vertical_sum());

        let size = if widget.is_container() {
            let flush = flush || flags.is_layout_changed();
            self.measure_container(id, client_width, client_height, flush)?
        } else {
            self.measure_leaf(id, width, client_width, flush || flags.is_layout_changed())?
        };
        let size = size.inflate(trim);
        Ok(Size::new(width.resolve(size.width), height.resolve(size.height)))
    }

    fn measure_container(
        &mut self,
        id: NodeId,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        let Some(mut strategy) = self.widget_mut(id)?.capabilities.take_layout() else {
            return self.children_extent(id);
        };
        let result = TreeLayoutContext::new(self, id)
            .and_then(|mut context| strategy.measure(&mut context, width, height, flush));
        if let Ok(widget) = self.widget_mut(id) {
            widget.capabilities.restore_layout(strategy);
        }
        result
    }

    /// Content size of a leaf, excluding trim.
    fn measure_leaf(
        &mut self,
        id: NodeId,
        width: SizeHint,
        client_width: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        let widget = self.widget(id)?;
        if !flush {
            if let Some(memo) = widget.intrinsic.filter(|memo| memo.width == width) {
                return Ok(memo.size);
            }
        }
        let size = match widget.capabilities.content() {
            Some(content) => content.measure_intrinsic(id, client_width),
            None => self.config.default_size,
        };
        let node = self.arena.live_mut(id)?;
        node.remove_flags(NodeFlags::LAYOUT_DIRTY);
        node.value_mut().intrinsic = Some(IntrinsicMemo { width, size });
        Ok(size)
    }

    /// Extent of a container without a strategy: the bounding box of its
    /// children measured from the client origin, or the default size when it
    /// has none.
    fn children_extent(&self, id: NodeId) -> TreeResult<Size> {
        let children = self.participating_children(id)?;
        if children.is_empty() {
            return Ok(self.config.default_size);
        }
        let widget = self.widget(id)?;
        let client = widget.client_area_with(widget.trim);
        let mut right = 0;
        let mut bottom = 0;
        for child in children {
            let bounds = self.widget(child)?.bounds;
            right = right.max(bounds.right() - client.x);
            bottom = bottom.max(bounds.bottom() - client.y);
        }
        Ok(Size::new(right, bottom))
    }

    /// Stores new bounds and reports geometry events.
    ///
    /// A container whose size changed is marked `LAYOUT_NEEDED`. Returns
    /// whether the size changed.
    pub(crate) fn assign_bounds(&mut self, id: NodeId, bounds: Rect) -> TreeResult<bool> {
        let bounds = Rect::new(bounds.x, bounds.y, bounds.width, bounds.height);
        let node = self.arena.live_mut(id)?;
        let widget = node.value_mut();
        let old = widget.bounds;
        if old == bounds {
            return Ok(false);
        }
        widget.bounds = bounds;
        let is_container = widget.is_container();
        let moved = old.origin() != bounds.origin();
        let resized = old.size() != bounds.size();
        if resized && is_container {
            node.insert_flags(NodeFlags::LAYOUT_NEEDED);
        }

        self.notify(|observer| observer.geometry_changed(id, old, bounds));
        if moved {
            let (from, to): (Point, Point) = (old.origin(), bounds.origin());
            self.notify(|observer| observer.moved(id, from, to));
        }
        if resized {
            let (from, to) = (old.size(), bounds.size());
            self.notify(|observer| observer.resized(id, from, to));
        }
        Ok(resized)
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
