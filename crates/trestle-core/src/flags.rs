use bitflags::bitflags;

bitflags! {
    /// Lifecycle and dirty state of a single node.
    ///
    /// Lifecycle bits only ever get added: a node moves from live through
    /// `DISPOSE_SENT` and `RELEASED` to `DISPOSED` and never back. The layout
    /// bits are set by invalidation and cleared by the layout pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u16 {
        /// Terminal state. The node is no longer part of any tree.
        const DISPOSED = 1 << 0;
        /// Resources were released and the node was detached from its parent.
        const RELEASED = 1 << 1;
        /// The dispose notification went out; teardown is in progress.
        const DISPOSE_SENT = 1 << 2;
        /// The node's own arrangement is stale.
        const LAYOUT_NEEDED = 1 << 3;
        /// Cached preferred sizes held for this node's children are stale.
        const LAYOUT_CHANGED = 1 << 4;
        /// Some descendant needs a layout pass.
        const LAYOUT_CHILD = 1 << 5;
        /// Style-derived trim must be resolved again before layout.
        const SKIN_NEEDED = 1 << 6;
    }
}

impl NodeFlags {
    /// Both bits a layout pass consumes on entry.
    pub const LAYOUT_DIRTY: NodeFlags = NodeFlags::LAYOUT_NEEDED.union(NodeFlags::LAYOUT_CHANGED);

    /// Flags every freshly created node starts with.
    pub const INITIAL: NodeFlags = NodeFlags::LAYOUT_NEEDED.union(NodeFlags::SKIN_NEEDED);

    pub fn is_layout_needed(self) -> bool {
        self.contains(NodeFlags::LAYOUT_NEEDED)
    }

    pub fn is_layout_changed(self) -> bool {
        self.contains(NodeFlags::LAYOUT_CHANGED)
    }

    pub fn has_dirty_descendant(self) -> bool {
        self.contains(NodeFlags::LAYOUT_CHILD)
    }

    /// True when a deferred pass has to visit this node or go through it.
    pub fn needs_visit(self) -> bool {
        self.intersects(NodeFlags::LAYOUT_NEEDED | NodeFlags::LAYOUT_CHILD)
    }

    pub fn is_skin_needed(self) -> bool {
        self.contains(NodeFlags::SKIN_NEEDED)
    }

    pub fn is_disposed(self) -> bool {
        self.contains(NodeFlags::DISPOSED)
    }

    pub fn is_released(self) -> bool {
        self.contains(NodeFlags::RELEASED)
    }

    /// True from the moment disposal starts, including after it finished.
    pub fn is_in_dispose(self) -> bool {
        self.intersects(NodeFlags::DISPOSE_SENT | NodeFlags::DISPOSED)
    }

    pub fn is_live(self) -> bool {
        !self.is_in_dispose()
    }
}
