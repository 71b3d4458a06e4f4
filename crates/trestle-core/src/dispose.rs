//! Two-phase subtree teardown.
//!
//! Disposal first announces itself on a node (`DISPOSE_SENT`), then releases
//! the children, then releases the node itself and detaches it from its
//! parent. Each node therefore sees its children fully released before its
//! own release runs, while every node already reports "in dispose" during the
//! whole teardown. Slots stay behind as tombstones.

use crate::{NodeArena, NodeFlags, NodeId, TreeResult};

/// Callbacks invoked while a subtree is torn down.
pub trait DisposeHooks<T> {
    /// The dispose notification for `id`, before any child is touched.
    fn dispose_sent(&mut self, _id: NodeId, _value: &mut T) {}

    /// `child` was removed from the child list of `parent`.
    fn detached(&mut self, _parent: NodeId, _child: NodeId) {}

    /// Releases the resources held by `id`.
    ///
    /// An error aborts the teardown and is propagated to the caller.
    fn release(&mut self, id: NodeId, value: &mut T) -> TreeResult<()>;
}

/// Outcome of [`dispose_subtree`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisposeReport {
    /// Nodes that reached `DISPOSED`, children before their parents.
    pub disposed: Vec<NodeId>,
    /// The parent the subtree root was detached from.
    pub detached_from: Option<NodeId>,
}

/// Disposes `root` and everything below it.
///
/// Disposing an already disposed node is a no-op that returns an empty
/// report.
pub fn dispose_subtree<T, H>(
    arena: &mut NodeArena<T>,
    root: NodeId,
    hooks: &mut H,
) -> TreeResult<DisposeReport>
where
    H: DisposeHooks<T> + ?Sized,
{
    let mut report = DisposeReport::default();
    if arena.flags(root)?.is_disposed() {
        return Ok(report);
    }
    log::debug!("disposing subtree rooted at node {root}");
    report.detached_from = dispose_node(arena, root, hooks, &mut report)?;
    log::debug!(
        "disposed {} node(s) under node {root}",
        report.disposed.len()
    );
    Ok(report)
}

fn dispose_node<T, H>(
    arena: &mut NodeArena<T>,
    id: NodeId,
    hooks: &mut H,
    report: &mut DisposeReport,
) -> TreeResult<Option<NodeId>>
where
    H: DisposeHooks<T> + ?Sized,
{
    let flags = arena.flags(id)?;
    if flags.is_disposed() {
        return Ok(None);
    }
    if !flags.contains(NodeFlags::DISPOSE_SENT) {
        let node = arena.get_mut(id)?;
        node.insert_flags(NodeFlags::DISPOSE_SENT);
        hooks.dispose_sent(id, node.value_mut());
    }

    for child in arena.child_ids(id)? {
        dispose_node(arena, child, hooks, report)?;
    }

    if arena.flags(id)?.is_released() {
        return Ok(None);
    }
    arena.insert_flags(id, NodeFlags::RELEASED)?;
    let parent = arena.detach(id)?;
    if let Some(parent) = parent {
        hooks.detached(parent, id);
    }

    let node = arena.get_mut(id)?;
    if let Err(err) = hooks.release(id, node.value_mut()) {
        log::warn!("release of node {id} failed: {err}");
        return Err(err);
    }
    node.remove_flags(NodeFlags::LAYOUT_DIRTY | NodeFlags::LAYOUT_CHILD | NodeFlags::SKIN_NEEDED);
    node.insert_flags(NodeFlags::DISPOSED);
    node.set_deferral_depth(0);
    report.disposed.push(id);
    Ok(parent)
}

#[cfg(test)]
#[path = "tests/dispose_tests.rs"]
mod tests;
