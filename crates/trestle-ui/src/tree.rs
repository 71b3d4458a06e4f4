use std::rc::Rc;

use trestle_core::{
    deferral, NodeArena, NodeFlags, NodeId, PreconditionViolation, TreeError, TreeResult, UiThread,
};
use trestle_geometry::{BoxInsets, Rect, Size};

use crate::{StyleProvider, TreeObserver, Unstyled, Widget, WidgetKind};

/// Tree-wide settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Preferred size of a leaf that has no content measurer.
    pub default_size: Size,
    /// Reject calls from threads other than the one that built the tree.
    pub enforce_thread: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_size: Size::new(64, 64),
            enforce_thread: true,
        }
    }
}

impl TreeConfig {
    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    pub fn with_thread_check(mut self, enforce: bool) -> Self {
        self.enforce_thread = enforce;
        self
    }
}

/// A widget tree bound to the thread that created it.
///
/// All operations are synchronous. Layout runs immediately after a mutation
/// unless the affected node or one of its ancestors is suspended, in which
/// case the work is recorded in dirty flags and flushed on the final
/// [`resume`](WidgetTree::resume).
pub struct WidgetTree {
    pub(crate) arena: NodeArena<Widget>,
    pub(crate) thread: UiThread,
    pub(crate) config: TreeConfig,
    pub(crate) style: Rc<dyn StyleProvider>,
    pub(crate) observers: Vec<Box<dyn TreeObserver>>,
    pub(crate) deferred_layouts: Vec<NodeId>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

impl WidgetTree {
    pub fn new(config: TreeConfig) -> Self {
        let thread = if config.enforce_thread {
            UiThread::current()
        } else {
            UiThread::unchecked()
        };
        Self {
            arena: NodeArena::new(),
            thread,
            config,
            style: Rc::new(Unstyled),
            observers: Vec::new(),
            deferred_layouts: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: Rc<dyn StyleProvider>) -> Self {
        self.style = style;
        self
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn thread(&self) -> UiThread {
        self.thread
    }

    pub fn add_observer(&mut self, observer: impl TreeObserver + 'static) -> TreeResult<()> {
        self.check_thread()?;
        self.observers.push(Box::new(observer));
        Ok(())
    }

    pub(crate) fn check_thread(&self) -> TreeResult<()> {
        self.thread.check().map_err(TreeError::from)
    }

    pub(crate) fn notify(&mut self, mut event: impl FnMut(&mut dyn TreeObserver)) {
        for observer in &mut self.observers {
            event(observer.as_mut());
        }
    }

    pub(crate) fn widget(&self, id: NodeId) -> TreeResult<&Widget> {
        Ok(self.arena.live(id)?.value())
    }

    pub(crate) fn widget_mut(&mut self, id: NodeId) -> TreeResult<&mut Widget> {
        Ok(self.arena.live_mut(id)?.value_mut())
    }

    pub(crate) fn require_container(&self, id: NodeId) -> TreeResult<&Widget> {
        let widget = self.widget(id)?;
        if !widget.is_container() {
            return Err(PreconditionViolation::NotAContainer { id }.into());
        }
        Ok(widget)
    }

    /// Trim of `id`, resolving it from the style if skinning is pending.
    pub(crate) fn effective_trim(&self, id: NodeId) -> TreeResult<BoxInsets> {
        let node = self.arena.live(id)?;
        if node.flags().is_skin_needed() {
            Ok(self.style.insets(node.value().kind()))
        } else {
            Ok(node.value().trim)
        }
    }

    /// Resolves pending style trim before a node is measured or arranged.
    pub(crate) fn ensure_skin(&mut self, id: NodeId) -> TreeResult<()> {
        if !self.arena.live(id)?.flags().is_skin_needed() {
            return Ok(());
        }
        let kind = self.widget(id)?.kind();
        let trim = self.style.insets(kind);
        let node = self.arena.live_mut(id)?;
        node.remove_flags(NodeFlags::SKIN_NEEDED);
        let widget = node.value_mut();
        if widget.trim != trim {
            widget.trim = trim;
            widget.intrinsic = None;
        }
        Ok(())
    }

    /// Live, visible children of `id` in paint order.
    pub(crate) fn participating_children(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let node = self.arena.live(id)?;
        Ok(node
            .children()
            .iter()
            .copied()
            .filter(|&child| {
                self.arena
                    .live(child)
                    .map(|entry| entry.value().visible)
                    .unwrap_or(false)
            })
            .collect())
    }

    // Queries

    pub fn kind(&self, id: NodeId) -> TreeResult<WidgetKind> {
        self.check_thread()?;
        Ok(self.arena.get(id)?.value().kind())
    }

    /// Bounds relative to the parent's origin.
    pub fn bounds(&self, id: NodeId) -> TreeResult<Rect> {
        self.check_thread()?;
        Ok(self.widget(id)?.bounds)
    }

    /// Area children are laid out in, in the node's own coordinates.
    pub fn client_area(&self, id: NodeId) -> TreeResult<Rect> {
        self.check_thread()?;
        let trim = self.effective_trim(id)?;
        Ok(self.widget(id)?.client_area_with(trim))
    }

    pub fn children(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        self.check_thread()?;
        self.arena.live(id)?;
        self.arena.child_ids(id)
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        self.check_thread()?;
        self.arena.parent(id)
    }

    /// Flags of any node, disposed ones included.
    pub fn flags(&self, id: NodeId) -> TreeResult<NodeFlags> {
        self.check_thread()?;
        self.arena.flags(id)
    }

    pub fn is_visible(&self, id: NodeId) -> TreeResult<bool> {
        self.check_thread()?;
        Ok(self.widget(id)?.visible)
    }

    pub fn is_disposed(&self, id: NodeId) -> TreeResult<bool> {
        self.check_thread()?;
        Ok(self.arena.flags(id)?.is_disposed())
    }

    /// True when `id` or any of its ancestors is suspended.
    pub fn is_layout_deferred(&self, id: NodeId) -> TreeResult<bool> {
        self.check_thread()?;
        self.arena.get(id)?;
        Ok(deferral::is_layout_deferred(&self.arena, id))
    }

    pub fn deferral_depth(&self, id: NodeId) -> TreeResult<u32> {
        self.check_thread()?;
        Ok(self.arena.get(id)?.deferral_depth())
    }

    /// `id` and every node below it, parents before children.
    pub fn descendants(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        self.check_thread()?;
        self.arena.live(id)?;
        self.arena.pre_order(id)
    }

    /// Number of nodes that are not disposed.
    pub fn live_count(&self) -> TreeResult<usize> {
        self.check_thread()?;
        Ok(self.arena.live_count())
    }

    pub fn dump_tree(&self, root: Option<NodeId>) -> TreeResult<String> {
        self.check_thread()?;
        Ok(self.arena.dump_tree(root))
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
