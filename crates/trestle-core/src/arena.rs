//! Slot storage for tree nodes.
//!
//! The arena owns every node. Ownership of the tree shape runs one way: a
//! parent's child set is the owning side, a child's `parent` is a plain id
//! used for ancestor walks. Disposed nodes keep their slot as a tombstone so a
//! stale id still answers lifecycle queries instead of aliasing a new node.

use std::fmt::Write as _;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::{NodeFlags, NodeId, PreconditionViolation, TreeError, TreeResult};

pub type ChildSet = IndexSet<NodeId, FxBuildHasher>;

/// A node slot: tree links, flags, deferral depth and the widget payload.
#[derive(Debug)]
pub struct TreeNode<T> {
    parent: Option<NodeId>,
    children: ChildSet,
    flags: NodeFlags,
    deferral_depth: u32,
    value: T,
}

impl<T> TreeNode<T> {
    fn new(value: T, parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: ChildSet::default(),
            flags: NodeFlags::INITIAL,
            deferral_depth: 0,
            value,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in paint order.
    pub fn children(&self) -> &ChildSet {
        &self.children
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn insert_flags(&mut self, flags: NodeFlags) {
        self.flags.insert(flags);
    }

    pub fn remove_flags(&mut self, flags: NodeFlags) {
        self.flags.remove(flags);
    }

    pub fn deferral_depth(&self) -> u32 {
        self.deferral_depth
    }

    pub(crate) fn set_deferral_depth(&mut self, depth: u32) {
        self.deferral_depth = depth;
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

#[derive(Debug)]
pub struct NodeArena<T> {
    nodes: Vec<TreeNode<T>>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of slots, tombstones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes that are not disposed.
    pub fn live_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| !node.flags.is_disposed())
            .count()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    /// Creates a node, appended as the last child of `parent` when given.
    ///
    /// The parent must be live. Whether the parent is allowed to hold
    /// children is the caller's decision.
    pub fn insert(&mut self, value: T, parent: Option<NodeId>) -> TreeResult<NodeId> {
        if let Some(parent) = parent {
            self.live(parent)?;
        }
        let id = self.nodes.len();
        self.nodes.push(TreeNode::new(value, parent));
        if let Some(parent) = parent {
            self.nodes[parent].children.insert(id);
        }
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> TreeResult<&TreeNode<T>> {
        self.nodes.get(id).ok_or(TreeError::missing(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> TreeResult<&mut TreeNode<T>> {
        self.nodes.get_mut(id).ok_or(TreeError::missing(id))
    }

    /// Like [`get`](Self::get) but rejects nodes that entered disposal.
    pub fn live(&self, id: NodeId) -> TreeResult<&TreeNode<T>> {
        let node = self.get(id)?;
        if node.flags.is_in_dispose() {
            return Err(TreeError::Disposed { node: id });
        }
        Ok(node)
    }

    pub fn live_mut(&mut self, id: NodeId) -> TreeResult<&mut TreeNode<T>> {
        let node = self.get_mut(id)?;
        if node.flags.is_in_dispose() {
            return Err(TreeError::Disposed { node: id });
        }
        Ok(node)
    }

    pub fn flags(&self, id: NodeId) -> TreeResult<NodeFlags> {
        Ok(self.get(id)?.flags)
    }

    pub fn insert_flags(&mut self, id: NodeId, flags: NodeFlags) -> TreeResult<()> {
        self.get_mut(id)?.flags.insert(flags);
        Ok(())
    }

    pub fn remove_flags(&mut self, id: NodeId, flags: NodeFlags) -> TreeResult<()> {
        self.get_mut(id)?.flags.remove(flags);
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    /// Snapshot of the children of `id` in paint order.
    pub fn child_ids(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        Ok(self.get(id)?.children.iter().copied().collect())
    }

    /// Inserts a detached `child` under `parent`, at `index` or at the end.
    pub fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> TreeResult<()> {
        self.live(parent)?;
        if self.get(child)?.parent.is_some() {
            self.detach(child)?;
        }
        let len = self.nodes[parent].children.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(PreconditionViolation::IndexOutOfRange { parent, index, len }.into());
        }
        self.nodes[parent].children.shift_insert(index, child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Unlinks `child` from its parent and returns the former parent.
    pub fn detach(&mut self, child: NodeId) -> TreeResult<Option<NodeId>> {
        let parent = self.get_mut(child)?.parent.take();
        if let Some(parent) = parent {
            self.get_mut(parent)?.children.shift_remove(&child);
        }
        Ok(parent)
    }

    /// Moves the child at `from` to position `to` among its siblings.
    pub fn move_child(&mut self, parent: NodeId, from: usize, to: usize) -> TreeResult<()> {
        let children = &mut self.get_mut(parent)?.children;
        let len = children.len();
        if from >= len {
            return Err(PreconditionViolation::IndexOutOfRange { parent, index: from, len }.into());
        }
        if to >= len {
            return Err(PreconditionViolation::IndexOutOfRange { parent, index: to, len }.into());
        }
        if from == to {
            return Ok(());
        }
        if let Some(child) = children.shift_remove_index(from) {
            children.shift_insert(to, child);
        }
        Ok(())
    }

    pub fn index_in_parent(&self, id: NodeId) -> TreeResult<Option<usize>> {
        match self.get(id)?.parent {
            Some(parent) => Ok(self.get(parent)?.children.get_index_of(&id)),
            None => Ok(None),
        }
    }

    /// Walks from the parent of `id` up to its root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        let next = self.nodes.get(id).and_then(|node| node.parent);
        Ancestors { arena: self, next }
    }

    /// True when `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    pub fn root_of(&self, id: NodeId) -> TreeResult<NodeId> {
        self.get(id)?;
        Ok(self.ancestors(id).last().unwrap_or(id))
    }

    /// Every node of the subtree rooted at `id`, parents before children.
    pub fn pre_order(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        self.get(id)?;
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            let node = &self.nodes[current];
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(order)
    }

    pub fn dump_tree(&self, root: Option<NodeId>) -> String {
        let mut output = String::new();
        if let Some(root_id) = root {
            self.dump_node(&mut output, root_id, 0);
        } else {
            output.push_str("(no root)\n");
        }
        output
    }

    fn dump_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match self.nodes.get(id) {
            Some(node) => {
                let _ = writeln!(output, "{indent}[{id}] {:?}", node.flags);
                for &child in &node.children {
                    self.dump_node(output, child, depth + 1);
                }
            }
            None => {
                let _ = writeln!(output, "{indent}[{id}] (missing)");
            }
        }
    }
}

/// Iterator over the strict ancestors of a node, nearest first.
pub struct Ancestors<'a, T> {
    arena: &'a NodeArena<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.nodes.get(current).and_then(|node| node.parent);
        Some(current)
    }
}

#[cfg(test)]
#[path = "tests/arena_tests.rs"]
mod tests;
