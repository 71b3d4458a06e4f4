use trestle_geometry::{BoxInsets, Rect, Size};

use crate::SizeHint;

/// The direction children are stacked in.
///
/// Strategies work in main/cross terms and use these helpers to map back to
/// width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Main axis left to right, cross axis top to bottom (a row).
    Horizontal,
    /// Main axis top to bottom, cross axis left to right (a column).
    Vertical,
}

impl Axis {
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    #[inline]
    pub fn main(self, size: Size) -> i32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    #[inline]
    pub fn cross(self, size: Size) -> i32 {
        self.cross_axis().main(size)
    }

    /// Builds a size from main and cross extents.
    pub fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    /// Builds a rect from main/cross offsets and extents.
    pub fn rect(self, main_pos: i32, cross_pos: i32, main: i32, cross: i32) -> Rect {
        match self {
            Axis::Horizontal => Rect::new(main_pos, cross_pos, main, cross),
            Axis::Vertical => Rect::new(cross_pos, main_pos, cross, main),
        }
    }

    /// Main and cross origin of a rect.
    pub fn origin(self, rect: Rect) -> (i32, i32) {
        match self {
            Axis::Horizontal => (rect.x, rect.y),
            Axis::Vertical => (rect.y, rect.x),
        }
    }

    /// Splits a pair of hints into (main, cross).
    pub fn hints(self, width: SizeHint, height: SizeHint) -> (SizeHint, SizeHint) {
        match self {
            Axis::Horizontal => (width, height),
            Axis::Vertical => (height, width),
        }
    }

    /// Joins (main, cross) hints back into (width, height).
    pub fn join_hints(self, main: SizeHint, cross: SizeHint) -> (SizeHint, SizeHint) {
        self.hints(main, cross)
    }

    /// Sum of the insets on the main axis.
    pub fn main_insets(self, insets: BoxInsets) -> i32 {
        match self {
            Axis::Horizontal => insets.horizontal_sum(),
            Axis::Vertical => insets.vertical_sum(),
        }
    }

    pub fn cross_insets(self, insets: BoxInsets) -> i32 {
        self.cross_axis().main_insets(insets)
    }
}
