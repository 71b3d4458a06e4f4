//! Testing utilities and harness for Trestle

pub mod content;
pub mod recorder;
pub mod rule;
pub mod strategy;

pub use content::{FixedContent, WrappingText};
pub use recorder::{EventRecorder, TreeEvent};
pub use rule::TreeTestRule;
pub use strategy::{CountingStrategy, FailingStrategy, PassCounter};

pub mod prelude {
    pub use crate::content::{FixedContent, WrappingText};
    pub use crate::recorder::{EventRecorder, TreeEvent};
    pub use crate::rule::TreeTestRule;
    pub use crate::strategy::{CountingStrategy, FailingStrategy, PassCounter};
    pub use trestle_ui::prelude::*;
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
