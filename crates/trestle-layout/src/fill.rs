use smallvec::SmallVec;
use trestle_core::{NodeId, TreeResult};
use trestle_geometry::{BoxInsets, Size};

use crate::{Axis, ChildSizeCache, LayoutContainer, LayoutStrategy, SizeHint};

/// Gives every child an equal share of the client area along one axis.
///
/// The preferred size is the largest child repeated once per child. When the
/// client extent does not divide evenly, the first child receives half of the
/// leftover units and the last child the rest.
#[derive(Clone, Debug)]
pub struct FillLayout {
    axis: Axis,
    spacing: i32,
    margin: BoxInsets,
    cache: ChildSizeCache,
}

impl FillLayout {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            spacing: 0,
            margin: BoxInsets::ZERO,
            cache: ChildSizeCache::new(),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing.max(0);
        self
    }

    pub fn margin(mut self, margin: BoxInsets) -> Self {
        self.margin = margin;
        self
    }

    fn total_spacing(&self, count: usize) -> i32 {
        if count > 1 {
            self.spacing * (count as i32 - 1)
        } else {
            0
        }
    }
}

impl LayoutStrategy for FillLayout {
    fn measure(
        &mut self,
        container: &mut dyn LayoutContainer,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        if flush {
            self.cache.clear();
        }
        let children: SmallVec<[NodeId; 8]> = container.children().iter().copied().collect();
        let count = children.len();
        let (main_hint, cross_hint) = self.axis.hints(width, height);
        let main_hint = match main_hint.value() {
            Some(extent) if count > 0 => {
                let free = extent - self.axis.main_insets(self.margin) - self.total_spacing(count);
                SizeHint::Exact((free / count as i32).max(0))
            }
            _ => SizeHint::Unconstrained,
        };
        let cross_hint = cross_hint.shrink(self.axis.cross_insets(self.margin));
        let (child_width, child_height) = self.axis.join_hints(main_hint, cross_hint);

        let mut max_main = 0;
        let mut max_cross = 0;
        for child in children {
            let size = self
                .cache
                .measure(container, child, child_width, child_height, flush)?;
            max_main = max_main.max(self.axis.main(size));
            max_cross = max_cross.max(self.axis.cross(size));
        }
        let main = max_main * count as i32 + self.total_spacing(count);
        Ok(self.axis.size(
            main + self.axis.main_insets(self.margin),
            max_cross + self.axis.cross_insets(self.margin),
        ))
    }

    fn arrange(&mut self, container: &mut dyn LayoutContainer, _flush: bool) -> TreeResult<()> {
        let children: SmallVec<[NodeId; 8]> = container.children().iter().copied().collect();
        if children.is_empty() {
            return Ok(());
        }
        let count = children.len() as i32;
        let area = container.client_area().deflate(self.margin);
        let (main_origin, cross_origin) = self.axis.origin(area);
        let cross = self.axis.cross(area.size());
        let free = (self.axis.main(area.size()) - self.total_spacing(children.len())).max(0);
        let cell = free / count;
        let extra = free % count;

        let mut cursor = main_origin;
        for (index, child) in children.into_iter().enumerate() {
            let mut extent = cell;
            if index == 0 {
                extent += extra / 2;
            } else if index as i32 == count - 1 {
                extent += (extra + 1) / 2;
            }
            container.place_child(child, self.axis.rect(cursor, cross_origin, extent, cross))?;
            cursor += extent + self.spacing;
        }
        Ok(())
    }

    fn flush_cache(&mut self, child: NodeId) -> bool {
        self.cache.remove(child)
    }

    fn debug_name(&self) -> &str {
        "FillLayout"
    }
}

#[cfg(test)]
#[path = "tests/fill_tests.rs"]
mod tests;
