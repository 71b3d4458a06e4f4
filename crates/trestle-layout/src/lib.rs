//! Layout contracts & strategies for Trestle

mod alignment;
mod arrangement;
mod axis;
mod cache;
mod core;
mod fill;
mod hint;
mod linear;
mod stack;

pub use alignment::*;
pub use arrangement::*;
pub use axis::*;
pub use cache::*;
pub use core::*;
pub use fill::*;
pub use hint::*;
pub use linear::*;
pub use stack::*;

pub mod prelude {
    pub use crate::alignment::CrossAxisAlignment;
    pub use crate::arrangement::LinearArrangement;
    pub use crate::axis::Axis;
    pub use crate::core::{LayoutContainer, LayoutStrategy};
    pub use crate::hint::SizeHint;
    pub use crate::{FillLayout, LinearLayout, StackLayout};
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
