//! Nested layout suppression.
//!
//! A node with a deferral depth above zero suppresses layout passes for its
//! whole subtree. Suppressed updates leave `LAYOUT_CHILD` breadcrumbs (see
//! [`mark_deferred_child`](crate::dirty::mark_deferred_child)) so the single
//! flush on the final resume only walks the dirty paths.

use crate::{NodeArena, NodeId, PreconditionViolation, TreeResult};

/// What happened to a scope on [`resume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resumed {
    /// The scope is still suppressing layout at the given depth.
    StillDeferred(u32),
    /// Depth reached zero and nothing below was marked.
    Idle,
    /// Depth reached zero and the subtree holds pending layout work.
    Flush,
}

/// Opens one more suppression level on `id` and returns the new depth.
pub fn suspend<T>(arena: &mut NodeArena<T>, id: NodeId) -> TreeResult<u32> {
    let node = arena.live_mut(id)?;
    let depth = node.deferral_depth() + 1;
    node.set_deferral_depth(depth);
    log::trace!("layout of node {id} suspended (depth {depth})");
    Ok(depth)
}

/// Closes one suppression level on `id`.
pub fn resume<T>(arena: &mut NodeArena<T>, id: NodeId) -> TreeResult<Resumed> {
    let node = arena.live_mut(id)?;
    let depth = node.deferral_depth();
    if depth == 0 {
        return Err(PreconditionViolation::UnbalancedResume { id }.into());
    }
    let depth = depth - 1;
    node.set_deferral_depth(depth);
    log::trace!("layout of node {id} resumed (depth {depth})");
    if depth > 0 {
        return Ok(Resumed::StillDeferred(depth));
    }
    if node.flags().needs_visit() {
        Ok(Resumed::Flush)
    } else {
        Ok(Resumed::Idle)
    }
}

/// Nearest node, `id` included, that currently suppresses layout.
pub fn find_deferred<T>(arena: &NodeArena<T>, id: NodeId) -> Option<NodeId> {
    std::iter::once(id)
        .chain(arena.ancestors(id))
        .find(|&node| {
            arena
                .get(node)
                .map(|entry| entry.deferral_depth() > 0)
                .unwrap_or(false)
        })
}

/// True when `id` or any ancestor suppresses layout.
pub fn is_layout_deferred<T>(arena: &NodeArena<T>, id: NodeId) -> bool {
    find_deferred(arena, id).is_some()
}

#[cfg(test)]
#[path = "tests/deferral_tests.rs"]
mod tests;
