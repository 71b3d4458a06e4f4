//! Core tree runtime for Trestle
//!
//! This crate owns the parts of the widget tree that do not care what a
//! widget is: the node arena with its parent links and owned child sets, the
//! per-node lifecycle and dirty flags, the rules that decide which nodes a
//! mutation invalidates, the layout deferral counters and the disposal state
//! machine. The layout engine in `trestle-ui` drives all of it.

mod arena;
pub mod deferral;
pub mod dirty;
pub mod dispose;
mod error;
mod flags;
mod thread;

/// Index of a node inside a [`NodeArena`]. Ids are never reused.
pub type NodeId = usize;

pub use arena::{Ancestors, ChildSet, NodeArena, TreeNode};
pub use deferral::Resumed;
pub use dirty::LayoutParticipant;
pub use dispose::{DisposeHooks, DisposeReport};
pub use error::{PreconditionViolation, TreeError, TreeResult};
pub use flags::NodeFlags;
pub use thread::UiThread;
