use smallvec::{smallvec, SmallVec};
use trestle_core::{NodeId, TreeResult};
use trestle_geometry::{BoxInsets, Size};

use crate::{
    Arrangement, Axis, ChildSizeCache, CrossAxisAlignment, LayoutContainer, LayoutStrategy,
    LinearArrangement, SizeHint,
};

/// Stacks children along one axis: a column or a row.
///
/// Children are measured at their preferred size on the main axis. On the
/// cross axis they keep their preferred extent and are aligned, unless the
/// alignment is [`CrossAxisAlignment::Fill`], in which case they are measured
/// against and stretched to the available cross extent.
///
/// ## Overflow
///
/// When the children do not fit on the main axis, the free-space
/// arrangement is dropped and children are packed from the start with the
/// fixed spacing only. Trailing children then extend past the client area.
#[derive(Clone, Debug)]
pub struct LinearLayout {
    axis: Axis,
    arrangement: LinearArrangement,
    cross_alignment: CrossAxisAlignment,
    margin: BoxInsets,
    cache: ChildSizeCache,
}

impl LinearLayout {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            arrangement: LinearArrangement::Start,
            cross_alignment: CrossAxisAlignment::Start,
            margin: BoxInsets::ZERO,
            cache: ChildSizeCache::new(),
        }
    }

    /// Children top to bottom.
    pub fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Children left to right.
    pub fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    /// Shorthand for a [`LinearArrangement::SpacedBy`] arrangement.
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.arrangement = LinearArrangement::spaced_by(spacing);
        self
    }

    pub fn cross_alignment(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    pub fn margin(mut self, margin: BoxInsets) -> Self {
        self.margin = margin;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of children with a cached preferred size.
    pub fn cached_children(&self) -> usize {
        self.cache.len()
    }

    fn child_hints(&self, cross_available: Option<i32>) -> (SizeHint, SizeHint) {
        let cross = match cross_available {
            Some(extent) if self.cross_alignment.is_fill() => SizeHint::Exact(extent),
            _ => SizeHint::Unconstrained,
        };
        self.axis.join_hints(SizeHint::Unconstrained, cross)
    }

    fn measure_children(
        &mut self,
        container: &mut dyn LayoutContainer,
        cross_available: Option<i32>,
        flush: bool,
    ) -> TreeResult<SmallVec<[(NodeId, Size); 8]>> {
        let children: SmallVec<[NodeId; 8]> = container.children().iter().copied().collect();
        let (width, height) = self.child_hints(cross_available);
        let mut measured = SmallVec::with_capacity(children.len());
        for child in children {
            let size = self.cache.measure(container, child, width, height, flush)?;
            measured.push((child, size));
        }
        Ok(measured)
    }

    fn total_spacing(&self, count: usize) -> i32 {
        if count > 1 {
            self.arrangement.spacing() * (count as i32 - 1)
        } else {
            0
        }
    }
}

impl LayoutStrategy for LinearLayout {
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
        let (_, cross_hint) = self.axis.hints(width, height);
        let cross_available = cross_hint
            .value()
            .map(|extent| (extent - self.axis.cross_insets(self.margin)).max(0));
        let measured = self.measure_children(container, cross_available, flush)?;

        let mut main = self.total_spacing(measured.len());
        let mut cross = 0;
        for (_, size) in &measured {
            main += self.axis.main(*size);
            cross = cross.max(self.axis.cross(*size));
        }
        Ok(self.axis.size(
            main + self.axis.main_insets(self.margin),
            cross + self.axis.cross_insets(self.margin),
        ))
    }

    fn arrange(&mut self, container: &mut dyn LayoutContainer, flush: bool) -> TreeResult<()> {
        if flush {
            self.cache.clear();
        }
        let area = container.client_area().deflate(self.margin);
        let available_main = self.axis.main(area.size());
        let available_cross = self.axis.cross(area.size());
        let measured = self.measure_children(container, Some(available_cross), flush)?;
        if measured.is_empty() {
            return Ok(());
        }

        let main_sizes: SmallVec<[i32; 8]> = measured
            .iter()
            .map(|(_, size)| self.axis.main(*size))
            .collect();
        let mut positions: SmallVec<[i32; 8]> = smallvec![0; main_sizes.len()];
        let content = main_sizes.iter().sum::<i32>() + self.total_spacing(main_sizes.len());
        let arrangement = if content > available_main {
            LinearArrangement::SpacedBy(self.arrangement.spacing())
        } else {
            self.arrangement
        };
        arrangement.arrange(available_main, &main_sizes, &mut positions);

        let (main_origin, cross_origin) = self.axis.origin(area);
        for ((child, size), position) in measured.iter().zip(positions) {
            let child_cross = self.axis.cross(*size);
            let bounds = self.axis.rect(
                main_origin + position,
                cross_origin + self.cross_alignment.align(available_cross, child_cross),
                self.axis.main(*size),
                self.cross_alignment.extent(available_cross, child_cross),
            );
            container.place_child(*child, bounds)?;
        }
        log::trace!(
            "LinearLayout placed {} child(ren) of node {} in {}",
            measured.len(),
            container.node_id(),
            area
        );
        Ok(())
    }

    fn flush_cache(&mut self, child: NodeId) -> bool {
        self.cache.remove(child)
    }

    fn debug_name(&self) -> &str {
        "LinearLayout"
    }
}

#[cfg(test)]
#[path = "tests/linear_tests.rs"]
mod tests;
