//! Widget tree and layout engine for Trestle
//!
//! [`WidgetTree`] owns every widget of one UI thread. It measures and arranges
//! containers through their [`LayoutStrategy`], turns mutations into dirty
//! flags, batches layout while a node is suspended and tears subtrees down in
//! a safe order. Rendering, text measurement and styling stay outside; they
//! plug in through [`ContentMeasurer`], [`StyleProvider`] and
//! [`TreeObserver`].

mod capability;
mod content;
mod dispose;
mod layout;
mod mutate;
mod observer;
mod style;
mod tree;
mod widget;

pub use capability::{Capabilities, CapabilityKind, ReleaseHook};
pub use content::ContentMeasurer;
pub use layout::{LayoutFlags, LayoutRequest};
pub use observer::TreeObserver;
pub use style::{StyleProvider, StyleSheet, Unstyled};
pub use tree::{TreeConfig, WidgetTree};
pub use widget::{ContainerSpec, LeafSpec, Widget, WidgetKind};

pub use trestle_core::{
    DisposeReport, NodeFlags, NodeId, PreconditionViolation, Resumed, TreeError, TreeResult,
};
pub use trestle_geometry::{BoxInsets, Point, Rect, Size};
pub use trestle_layout::{
    Axis, CrossAxisAlignment, FillLayout, LayoutContainer, LayoutStrategy, LinearArrangement,
    LinearLayout, SizeHint, StackLayout,
};

pub mod prelude {
    pub use crate::{
        ContainerSpec, ContentMeasurer, LayoutFlags, LayoutRequest, LeafSpec, TreeObserver,
        WidgetKind, WidgetTree,
    };
    pub use trestle_geometry::prelude::*;
    pub use trestle_layout::prelude::*;
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
