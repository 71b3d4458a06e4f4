//! Dirty-flag propagation rules.
//!
//! Each function here implements one kind of invalidation and only touches
//! flags and caches. Running the layout passes that consume the flags is the
//! engine's job, which is why several functions return the nodes that now
//! need an update instead of updating them.
//!
//! | mutation | marks |
//! |---|---|
//! | content change | the node, then its parent (`CHANGED` only when flushing) |
//! | add / remove / reorder child | the container, `NEEDED` |
//! | `layout(changed, all)` | the container and every descendant container |
//! | targeted re-layout | only the ancestor chain of each target |
//! | suppressed update | `LAYOUT_CHILD` from the node up to the deferring scope |

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::{NodeArena, NodeFlags, NodeId, TreeError, TreeResult};

/// What the dirty tracker needs to know about a node payload.
pub trait LayoutParticipant {
    /// Whether the node owns a layout strategy.
    fn has_layout(&self) -> bool;

    /// Drops whatever the node's strategy cached for `child`.
    ///
    /// Returns `true` when a cache entry existed and was cleared, which makes
    /// the node's own cached size stale as well.
    fn flush_cache(&mut self, child: NodeId) -> bool;

    /// Whether the node takes part in its parent's measurement.
    fn participates(&self) -> bool {
        true
    }

    /// Forgets any memoized intrinsic size.
    fn invalidate_intrinsic(&mut self) {}
}

/// Marks a node whose content changed, then its parent.
///
/// Returns the parent that has to be updated, if the node participates in
/// its parent's measurement.
pub fn mark_content_changed<T: LayoutParticipant>(
    arena: &mut NodeArena<T>,
    node: NodeId,
    flush: bool,
) -> TreeResult<Option<NodeId>> {
    let entry = arena.live_mut(node)?;
    entry.value_mut().invalidate_intrinsic();
    if !entry.value().participates() {
        return Ok(None);
    }
    entry.insert_flags(NodeFlags::LAYOUT_DIRTY);
    let Some(parent) = entry.parent() else {
        return Ok(None);
    };

    let parent_entry = arena.live_mut(parent)?;
    let mut bits = NodeFlags::LAYOUT_NEEDED;
    if flush {
        parent_entry.value_mut().flush_cache(node);
        bits |= NodeFlags::LAYOUT_CHANGED;
    }
    parent_entry.insert_flags(bits);
    log::trace!("content of node {node} changed; parent {parent} marked {bits:?}");
    Ok(Some(parent))
}

/// Marks a container whose set or order of children changed.
pub fn mark_structure_changed<T>(arena: &mut NodeArena<T>, container: NodeId) -> TreeResult<()> {
    arena
        .live_mut(container)?
        .insert_flags(NodeFlags::LAYOUT_NEEDED);
    Ok(())
}

/// Marks `id` for layout and, with `all`, every descendant as well.
///
/// Only nodes that own a layout strategy receive `LAYOUT_NEEDED`. With `all`,
/// every visited node that has children also gets `LAYOUT_CHILD` so a
/// deferred pass can find the marked descendants later. Returns how many
/// nodes were marked for layout.
pub fn mark_layout<T: LayoutParticipant>(
    arena: &mut NodeArena<T>,
    id: NodeId,
    changed: bool,
    all: bool,
) -> TreeResult<usize> {
    let mut bits = NodeFlags::LAYOUT_NEEDED;
    if changed {
        bits |= NodeFlags::LAYOUT_CHANGED;
    }

    arena.live(id)?;
    let targets = if all { arena.pre_order(id)? } else { vec![id] };
    let mut marked = 0;
    for target in targets {
        let node = arena.get_mut(target)?;
        if node.flags().is_in_dispose() {
            continue;
        }
        if node.value().has_layout() {
            node.insert_flags(bits);
            marked += 1;
        }
        if all && !node.children().is_empty() {
            node.insert_flags(NodeFlags::LAYOUT_CHILD);
        }
    }
    log::trace!("marked {marked} node(s) under {id} with {bits:?} (all: {all})");
    Ok(marked)
}

/// Marks only the ancestor chains between each target and `container`.
///
/// Every target is validated before any flag changes: a disposed target or
/// one that does not live under `container` fails the whole batch. Each
/// ancestor on a chain gets `LAYOUT_NEEDED`, plus `LAYOUT_CHANGED` when its
/// strategy reports that it dropped a cached size for the child on the chain.
/// A walk stops at the first edge an earlier target already walked, so shared
/// ancestors are queued once.
///
/// Returns the ancestors to update, outermost first.
pub fn mark_ancestor_paths<T: LayoutParticipant>(
    arena: &mut NodeArena<T>,
    container: NodeId,
    targets: &[NodeId],
) -> TreeResult<Vec<NodeId>> {
    arena.live(container)?;
    for &target in targets {
        arena.live(target)?;
        if !arena.is_ancestor(container, target) {
            return Err(TreeError::InvalidParent {
                node: target,
                container,
            });
        }
    }

    let mut walked: FxHashSet<NodeId> = FxHashSet::default();
    let mut queued: FxHashSet<NodeId> = FxHashSet::default();
    let mut update = Vec::new();
    for &target in targets {
        arena.get_mut(target)?.value_mut().invalidate_intrinsic();
        let mut child = target;
        while child != container {
            if !walked.insert(child) {
                break;
            }
            let parent = arena.parent(child)?.ok_or(TreeError::InvalidParent {
                node: target,
                container,
            })?;
            let node = arena.get_mut(parent)?;
            let mut bits = NodeFlags::LAYOUT_NEEDED;
            if node.value_mut().flush_cache(child) {
                bits |= NodeFlags::LAYOUT_CHANGED;
            }
            node.insert_flags(bits);
            if queued.insert(parent) {
                update.push(parent);
            }
            child = parent;
        }
    }

    update.sort_by_cached_key(|&id| arena.depth(id));
    log::trace!(
        "targeted layout under {container}: {} target(s), {} ancestor(s) queued",
        targets.len(),
        update.len()
    );
    Ok(update)
}

/// Records that an update of `node` was suppressed by the deferring `scope`.
///
/// Sets `LAYOUT_CHILD` on every node from the parent of `node` up to and
/// including `scope`, stopping early at a node that is already flagged.
pub fn mark_deferred_child<T>(
    arena: &mut NodeArena<T>,
    node: NodeId,
    scope: NodeId,
) -> TreeResult<()> {
    if node == scope {
        arena.insert_flags(scope, NodeFlags::LAYOUT_CHILD)?;
        return Ok(());
    }

    let mut path: SmallVec<[NodeId; 16]> = SmallVec::new();
    for ancestor in arena.ancestors(node) {
        path.push(ancestor);
        if ancestor == scope {
            break;
        }
    }
    if path.last() != Some(&scope) {
        return Err(TreeError::InvalidParent {
            node,
            container: scope,
        });
    }

    for ancestor in path {
        let entry = arena.get_mut(ancestor)?;
        if entry.flags().has_dirty_descendant() && ancestor != scope {
            break;
        }
        entry.insert_flags(NodeFlags::LAYOUT_CHILD);
    }
    Ok(())
}

/// Consumes the layout bits of `id` at the start of a pass.
///
/// Returns `None` when the node does not need layout, otherwise whether
/// cached sizes have to be flushed.
pub fn take_layout_flags<T>(arena: &mut NodeArena<T>, id: NodeId) -> TreeResult<Option<bool>> {
    let node = arena.live_mut(id)?;
    let flags = node.flags();
    if !flags.is_layout_needed() {
        return Ok(None);
    }
    node.remove_flags(NodeFlags::LAYOUT_DIRTY);
    Ok(Some(flags.is_layout_changed()))
}

#[cfg(test)]
#[path = "tests/dirty_tests.rs"]
mod tests;
