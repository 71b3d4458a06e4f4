use rustc_hash::FxHashMap;
use trestle_core::{NodeId, TreeError, TreeResult};
use trestle_geometry::{Rect, Size};

use crate::{LayoutContainer, SizeHint};

/// A container whose children report fixed sizes and echo exact hints.
pub(crate) struct MockContainer {
    pub id: NodeId,
    pub children: Vec<NodeId>,
    pub sizes: FxHashMap<NodeId, Size>,
    pub client: Rect,
    pub placed: Vec<(NodeId, Rect)>,
    pub measure_calls: Vec<(NodeId, SizeHint, SizeHint, bool)>,
}

impl MockContainer {
    pub fn new(client: Rect) -> Self {
        Self {
            id: 0,
            children: Vec::new(),
            sizes: FxHashMap::default(),
            client,
            placed: Vec::new(),
            measure_calls: Vec::new(),
        }
    }

    pub fn with_child(mut self, id: NodeId, size: Size) -> Self {
        self.children.push(id);
        self.sizes.insert(id, size);
        self
    }

    pub fn placement(&self, id: NodeId) -> Option<Rect> {
        self.placed
            .iter()
            .rev()
            .find(|(child, _)| *child == id)
            .map(|(_, rect)| *rect)
    }

    pub fn measure_count(&self, id: NodeId) -> usize {
        self.measure_calls
            .iter()
            .filter(|(child, ..)| *child == id)
            .count()
    }
}

impl LayoutContainer for MockContainer {
    fn node_id(&self) -> NodeId {
        self.id
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
        self.measure_calls.push((child, width, height, flush));
        let base = self
            .sizes
            .get(&child)
            .copied()
            .ok_or(TreeError::missing(child))?;
        Ok(Size::new(
            width.resolve(base.width),
            height.resolve(base.height),
        ))
    }

    fn place_child(&mut self, child: NodeId, bounds: Rect) -> TreeResult<()> {
        self.placed.push((child, bounds));
        Ok(())
    }
}
