use smallvec::SmallVec;
use trestle_core::{NodeId, TreeResult};
use trestle_geometry::{BoxInsets, Size};

use crate::{LayoutContainer, LayoutStrategy, SizeHint};

/// Overlays every child on the whole client area.
///
/// Keeps no cache; every measure asks the children again.
#[derive(Clone, Debug, Default)]
pub struct StackLayout {
    margin: BoxInsets,
}

impl StackLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn margin(mut self, margin: BoxInsets) -> Self {
        self.margin = margin;
        self
    }
}

impl LayoutStrategy for StackLayout {
    fn measure(
        &mut self,
        container: &mut dyn LayoutContainer,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        let children: SmallVec<[NodeId; 8]> = container.children().iter().copied().collect();
        let width = width.shrink(self.margin.horizontal_sum());
        let height = height.shrink(self.margin.vertical_sum());
        let mut max_width = 0;
        let mut max_height = 0;
        for child in children {
            let size = container.measure_child(child, width, height, flush)?;
            max_width = max_width.max(size.width);
            max_height = max_height.max(size.height);
        }
        Ok(Size::new(max_width, max_height).inflate(self.margin))
    }

    fn arrange(&mut self, container: &mut dyn LayoutContainer, _flush: bool) -> TreeResult<()> {
        let area = container.client_area().deflate(self.margin);
        let children: SmallVec<[NodeId; 8]> = container.children().iter().copied().collect();
        for child in children {
            container.place_child(child, area)?;
        }
        Ok(())
    }

    fn debug_name(&self) -> &str {
        "StackLayout"
    }
}

#[cfg(test)]
#[path = "tests/stack_tests.rs"]
mod tests;
