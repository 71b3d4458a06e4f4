use rustc_hash::FxHashMap;
use trestle_core::{NodeId, TreeResult};
use trestle_geometry::Size;

use crate::{LayoutContainer, SizeHint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CachedSize {
    width: SizeHint,
    height: SizeHint,
    size: Size,
}

/// Preferred sizes of children, keyed by child id and the hints they were
/// measured with.
#[derive(Clone, Debug, Default)]
pub struct ChildSizeCache {
    entries: FxHashMap<NodeId, CachedSize>,
}

impl ChildSizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached size for these hints or measures the child.
    ///
    /// With `flush` the entry is always recomputed.
    pub fn measure(
        &mut self,
        container: &mut dyn LayoutContainer,
        child: NodeId,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        if !flush {
            if let Some(entry) = self.entries.get(&child) {
                if entry.width == width && entry.height == height {
                    return Ok(entry.size);
                }
            }
        }
        let size = container.measure_child(child, width, height, flush)?;
        self.entries.insert(
            child,
            CachedSize {
                width,
                height,
                size,
            },
        );
        Ok(size)
    }

    /// Forgets one child; `true` when it had an entry.
    pub fn remove(&mut self, child: NodeId) -> bool {
        self.entries.remove(&child).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, child: NodeId) -> bool {
        self.entries.contains_key(&child)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
