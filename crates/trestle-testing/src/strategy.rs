use std::cell::Cell;
use std::rc::Rc;

use trestle_ui::{LayoutContainer, LayoutStrategy, NodeId, Size, SizeHint, TreeError, TreeResult};

/// Shared tallies of the passes a [`CountingStrategy`] ran.
#[derive(Debug, Clone, Default)]
pub struct PassCounter {
    measures: Rc<Cell<usize>>,
    arranges: Rc<Cell<usize>>,
    flushed: Rc<Cell<usize>>,
}

impl PassCounter {
    pub fn measures(&self) -> usize {
        self.measures.get()
    }

    pub fn arranges(&self) -> usize {
        self.arranges.get()
    }

    /// Passes that ran with `flush` set.
    pub fn flushed(&self) -> usize {
        self.flushed.get()
    }

    pub fn reset(&self) {
        self.measures.set(0);
        self.arranges.set(0);
        self.flushed.set(0);
    }

    fn bump(cell: &Cell<usize>) {
        cell.set(cell.get() + 1);
    }
}

/// Delegates to another strategy and counts every pass.
pub struct CountingStrategy<S> {
    inner: S,
    counter: PassCounter,
}

impl<S: LayoutStrategy> CountingStrategy<S> {
    /// Wraps `inner`; the returned counter stays readable after the strategy
    /// moved into the tree.
    pub fn new(inner: S) -> (Self, PassCounter) {
        let counter = PassCounter::default();
        (
            Self {
                inner,
                counter: counter.clone(),
            },
            counter,
        )
    }
}

impl<S: LayoutStrategy> LayoutStrategy for CountingStrategy<S> {
    fn measure(
        &mut self,
        container: &mut dyn LayoutContainer,
        width: SizeHint,
        height: SizeHint,
        flush: bool,
    ) -> TreeResult<Size> {
        PassCounter::bump(&self.counter.measures);
        if flush {
            PassCounter::bump(&self.counter.flushed);
        }
        self.inner.measure(container, width, height, flush)
    }

    fn arrange(&mut self, container: &mut dyn LayoutContainer, flush: bool) -> TreeResult<()> {
        PassCounter::bump(&self.counter.arranges);
        if flush {
            PassCounter::bump(&self.counter.flushed);
        }
        self.inner.arrange(container, flush)
    }

    fn flush_cache(&mut self, child: NodeId) -> bool {
        self.inner.flush_cache(child)
    }

    fn debug_name(&self) -> &str {
        self.inner.debug_name()
    }
}

/// Fails its passes with a strategy error.
#[derive(Debug, Clone)]
pub struct FailingStrategy {
    message: String,
    fail_measure: bool,
    fail_arrange: bool,
}

impl FailingStrategy {
    /// Fails both measure and arrange.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fail_measure: true,
            fail_arrange: true,
        }
    }

    /// Measures as empty and only fails arrange.
    pub fn on_arrange(message: impl Into<String>) -> Self {
        Self {
            fail_measure: false,
            ..Self::new(message)
        }
    }

    fn error(&self, container: &dyn LayoutContainer) -> TreeError {
        TreeError::strategy(container.node_id(), self.debug_name(), self.message.clone())
    }
}

impl LayoutStrategy for FailingStrategy {
    fn measure(
        &mut self,
        container: &mut dyn LayoutContainer,
        _width: SizeHint,
        _height: SizeHint,
        _flush: bool,
    ) -> TreeResult<Size> {
        if self.fail_measure {
            return Err(self.error(container));
        }
        Ok(Size::ZERO)
    }

    fn arrange(&mut self, container: &mut dyn LayoutContainer, _flush: bool) -> TreeResult<()> {
        if self.fail_arrange {
            return Err(self.error(container));
        }
        Ok(())
    }

    fn debug_name(&self) -> &str {
        "FailingStrategy"
    }
}
