use std::cell::{Cell, RefCell};
use std::rc::Rc;

use trestle_core::{NodeId, TreeError, TreeResult};
use trestle_geometry::{Rect, Size};
use trestle_layout::{LayoutContainer, LayoutStrategy, SizeHint};

use crate::{ContentMeasurer, TreeObserver};

/// Content with a fixed intrinsic size that counts how often it is measured.
pub(crate) struct FixedContent {
    size: Cell<Size>,
    calls: Cell<usize>,
}

impl FixedContent {
    pub fn new(width: i32, height: i32) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(Size::new(width, height)),
            calls: Cell::new(0),
        })
    }

    pub fn set(&self, width: i32, height: i32) {
        self.size.set(Size::new(width, height));
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ContentMeasurer for FixedContent {
    fn measure_intrinsic(&self, _node: NodeId, _width: SizeHint) -> Size {
        self.calls.set(self.calls.get() + 1);
        self.size.get()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Geometry(NodeId, Rect),
    Added(NodeId, NodeId),
    Removed(NodeId, NodeId),
    DisposeSent(NodeId),
    LaidOut(NodeId, bool),
}

#[derive(Clone, Default)]
pub(crate) struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn laid_out(&self) -> Vec<NodeId> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::LaidOut(node, _) => Some(*node),
                _ => None,
            })
            .collect()
    }
}

impl TreeObserver for Recorder {
    fn geometry_changed(&mut self, node: NodeId, _old: Rect, new: Rect) {
        self.events.borrow_mut().push(Event::Geometry(node, new));
    }

    fn child_added(&mut self, parent: NodeId, child: NodeId) {
        self.events.borrow_mut().push(Event::Added(parent, child));
    }

    fn child_removed(&mut self, parent: NodeId, child: NodeId) {
        self.events.borrow_mut().push(Event::Removed(parent, child));
    }

    fn dispose_sent(&mut self, node: NodeId) {
        self.events.borrow_mut().push(Event::DisposeSent(node));
    }

    fn laid_out(&mut self, node: NodeId, flush: bool) {
        self.events.borrow_mut().push(Event::LaidOut(node, flush));
    }
}

/// A strategy that rejects every pass.
pub(crate) struct FailingLayout;

impl LayoutStrategy for FailingLayout {
    fn measure(
        &mut self,
        container: &mut dyn LayoutContainer,
        _width: SizeHint,
        _height: SizeHint,
        _flush: bool,
    ) -> TreeResult<Size> {
        Err(TreeError::strategy(container.node_id(), "FailingLayout", "measure"))
    }

    fn arrange(&mut self, container: &mut dyn LayoutContainer, _flush: bool) -> TreeResult<()> {
        Err(TreeError::strategy(container.node_id(), "FailingLayout", "arrange"))
    }

    fn debug_name(&self) -> &str {
        "FailingLayout"
    }
}

pub(crate) type ReleaseLog = Rc<RefCell<Vec<NodeId>>>;

/// A release hook that appends the node to `log`, or fails when `fail` is set.
pub(crate) fn logged_release(
    log: &ReleaseLog,
    fail: bool,
) -> impl FnMut(NodeId) -> Result<(), String> + 'static {
    let log = Rc::clone(log);
    move |node| {
        if fail {
            return Err("locked".to_string());
        }
        log.borrow_mut().push(node);
        Ok(())
    }
}
