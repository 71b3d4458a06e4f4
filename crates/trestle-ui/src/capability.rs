//! Per-widget behavior, composed at construction time.

use std::fmt;
use std::rc::Rc;

use trestle_core::NodeId;
use trestle_layout::LayoutStrategy;

use crate::ContentMeasurer;

/// Frees whatever a widget holds outside the tree.
pub trait ReleaseHook {
    fn release(&mut self, node: NodeId) -> Result<(), String>;
}

impl<F> ReleaseHook for F
where
    F: FnMut(NodeId) -> Result<(), String>,
{
    fn release(&mut self, node: NodeId) -> Result<(), String> {
        self(node)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Content,
    Layout,
    Release,
}

/// The capabilities a widget was built with.
#[derive(Default)]
pub struct Capabilities {
    content: Option<Rc<dyn ContentMeasurer>>,
    layout: Option<Box<dyn LayoutStrategy>>,
    release: Option<Box<dyn ReleaseHook>>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: CapabilityKind) -> bool {
        match kind {
            CapabilityKind::Content => self.content.is_some(),
            CapabilityKind::Layout => self.layout.is_some(),
            CapabilityKind::Release => self.release.is_some(),
        }
    }

    pub fn content(&self) -> Option<&Rc<dyn ContentMeasurer>> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: Option<Rc<dyn ContentMeasurer>>) {
        self.content = content;
    }

    pub fn layout(&self) -> Option<&dyn LayoutStrategy> {
        self.layout.as_deref()
    }

    pub fn layout_mut(&mut self) -> Option<&mut (dyn LayoutStrategy + 'static)> {
        self.layout.as_deref_mut()
    }

    /// Replaces the strategy and returns the previous one.
    pub fn set_layout(
        &mut self,
        layout: Option<Box<dyn LayoutStrategy>>,
    ) -> Option<Box<dyn LayoutStrategy>> {
        std::mem::replace(&mut self.layout, layout)
    }

    /// Moves the strategy out for the duration of a pass.
    pub(crate) fn take_layout(&mut self) -> Option<Box<dyn LayoutStrategy>> {
        self.layout.take()
    }

    pub(crate) fn restore_layout(&mut self, layout: Box<dyn LayoutStrategy>) {
        self.layout = Some(layout);
    }

    pub fn set_release(&mut self, release: Option<Box<dyn ReleaseHook>>) {
        self.release = release;
    }

    pub(crate) fn release_mut(&mut self) -> Option<&mut (dyn ReleaseHook + 'static)> {
        self.release.as_deref_mut()
    }

    /// Drops every capability.
    pub fn clear(&mut self) {
        self.content = None;
        self.layout = None;
        self.release = None;
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("content", &self.content.is_some())
            .field(
                "layout",
                &self.layout.as_ref().map(|layout| layout.debug_name()),
            )
            .field("release", &self.release.is_some())
            .finish()
    }
}
