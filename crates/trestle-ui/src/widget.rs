use std::fmt;
use std::rc::Rc;

use trestle_core::{LayoutParticipant, NodeId};
use trestle_geometry::{BoxInsets, Rect, Size};
use trestle_layout::{LayoutStrategy, SizeHint};

use crate::{Capabilities, CapabilityKind, ContentMeasurer, ReleaseHook};

/// The closed set of widget kinds.
///
/// The kind decides whether a widget can hold children and which style entry
/// applies to it. Everything else is a capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Window,
    Panel,
    Group,
    Label,
    Button,
    TextField,
    Image,
}

impl WidgetKind {
    pub fn is_container(self) -> bool {
        matches!(self, WidgetKind::Window | WidgetKind::Panel | WidgetKind::Group)
    }

    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Window => "Window",
            WidgetKind::Panel => "Panel",
            WidgetKind::Group => "Group",
            WidgetKind::Label => "Label",
            WidgetKind::Button => "Button",
            WidgetKind::TextField => "TextField",
            WidgetKind::Image => "Image",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Intrinsic size of a leaf, remembered with the width hint it was computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct IntrinsicMemo {
    pub width: SizeHint,
    pub size: Size,
}

/// The payload stored for every node of a [`WidgetTree`](crate::WidgetTree).
#[derive(Debug)]
pub struct Widget {
    kind: WidgetKind,
    pub(crate) bounds: Rect,
    pub(crate) visible: bool,
    pub(crate) trim: BoxInsets,
    pub(crate) intrinsic: Option<IntrinsicMemo>,
    pub(crate) capabilities: Capabilities,
}

impl Widget {
    fn new(kind: WidgetKind, bounds: Rect, visible: bool, capabilities: Capabilities) -> Self {
        Self {
            kind,
            bounds: Rect::new(bounds.x, bounds.y, bounds.width, bounds.height),
            visible,
            trim: BoxInsets::ZERO,
            intrinsic: None,
            capabilities,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Trim resolved at the last skinning.
    pub fn trim(&self) -> BoxInsets {
        self.trim
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Client area in the widget's own coordinates.
    pub(crate) fn client_area_with(&self, trim: BoxInsets) -> Rect {
        Rect::from_size(self.bounds.size()).deflate(trim)
    }
}

impl LayoutParticipant for Widget {
    fn has_layout(&self) -> bool {
        self.capabilities.has(CapabilityKind::Layout)
    }

    fn flush_cache(&mut self, child: NodeId) -> bool {
        self.capabilities
            .layout_mut()
            .map(|layout| layout.flush_cache(child))
            .unwrap_or(false)
    }

    fn participates(&self) -> bool {
        self.visible
    }

    fn invalidate_intrinsic(&mut self) {
        self.intrinsic = None;
    }
}

/// Builder for a widget that holds children.
pub struct ContainerSpec {
    kind: WidgetKind,
    bounds: Rect,
    visible: bool,
    layout: Option<Box<dyn LayoutStrategy>>,
    release: Option<Box<dyn ReleaseHook>>,
}

impl ContainerSpec {
    fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            bounds: Rect::ZERO,
            visible: true,
            layout: None,
            release: None,
        }
    }

    pub fn window() -> Self {
        Self::new(WidgetKind::Window)
    }

    pub fn panel() -> Self {
        Self::new(WidgetKind::Panel)
    }

    pub fn group() -> Self {
        Self::new(WidgetKind::Group)
    }

    pub fn layout(mut self, layout: impl LayoutStrategy + 'static) -> Self {
        self.layout = Some(Box::new(layout));
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn on_release(mut self, hook: impl ReleaseHook + 'static) -> Self {
        self.release = Some(Box::new(hook));
        self
    }

    pub(crate) fn build(self) -> Widget {
        let mut capabilities = Capabilities::new();
        capabilities.set_layout(self.layout);
        capabilities.set_release(self.release);
        Widget::new(self.kind, self.bounds, self.visible, capabilities)
    }
}

/// Builder for a widget without children.
pub struct LeafSpec {
    kind: WidgetKind,
    bounds: Rect,
    visible: bool,
    content: Option<Rc<dyn ContentMeasurer>>,
    release: Option<Box<dyn ReleaseHook>>,
}

impl LeafSpec {
    fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            bounds: Rect::ZERO,
            visible: true,
            content: None,
            release: None,
        }
    }

    pub fn label() -> Self {
        Self::new(WidgetKind::Label)
    }

    pub fn button() -> Self {
        Self::new(WidgetKind::Button)
    }

    pub fn text_field() -> Self {
        Self::new(WidgetKind::TextField)
    }

    pub fn image() -> Self {
        Self::new(WidgetKind::Image)
    }

    pub fn content(mut self, content: Rc<dyn ContentMeasurer>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn on_release(mut self, hook: impl ReleaseHook + 'static) -> Self {
        self.release = Some(Box::new(hook));
        self
    }

    pub(crate) fn build(self) -> Widget {
        let mut capabilities = Capabilities::new();
        capabilities.set_content(self.content);
        capabilities.set_release(self.release);
        Widget::new(self.kind, self.bounds, self.visible, capabilities)
    }
}

#[cfg(test)]
#[path = "tests/widget_tests.rs"]
mod tests;
