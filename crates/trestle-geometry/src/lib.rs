//! Pure integer geometry for Trestle
//!
//! Widget geometry is expressed in whole device units. Sizes never go
//! negative: every constructor that produces a [`Size`] or [`Rect`] from
//! caller input clamps width and height to zero.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{BoxInsets, Point, Rect, Size};
}
