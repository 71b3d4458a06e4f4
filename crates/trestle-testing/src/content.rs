use std::cell::Cell;
use std::rc::Rc;

use trestle_ui::{ContentMeasurer, NodeId, Size, SizeHint};

/// Content with a settable intrinsic size that ignores the width hint.
///
/// Counts how often it was measured, which is how tests observe memoization.
#[derive(Debug)]
pub struct FixedContent {
    size: Cell<Size>,
    measured: Cell<usize>,
}

impl FixedContent {
    pub fn new(width: i32, height: i32) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(Size::new(width, height)),
            measured: Cell::new(0),
        })
    }

    /// Changes the size reported from the next measurement on. The tree
    /// still has to be told through `content_changed`.
    pub fn set(&self, width: i32, height: i32) {
        self.size.set(Size::new(width, height));
    }

    pub fn size(&self) -> Size {
        self.size.get()
    }

    pub fn measure_count(&self) -> usize {
        self.measured.get()
    }
}

impl ContentMeasurer for FixedContent {
    fn measure_intrinsic(&self, _node: NodeId, _width: SizeHint) -> Size {
        self.measured.set(self.measured.get() + 1);
        self.size.get()
    }
}

/// Monospaced text that wraps to the width hint.
///
/// Every character is `char_width` wide; lines are `line_height` tall.
/// Unconstrained width lays the text out on one line.
#[derive(Debug, Clone)]
pub struct WrappingText {
    chars: usize,
    char_width: i32,
    line_height: i32,
}

impl WrappingText {
    pub fn new(chars: usize, char_width: i32, line_height: i32) -> Rc<Self> {
        Rc::new(Self {
            chars,
            char_width: char_width.max(1),
            line_height: line_height.max(0),
        })
    }
}

impl ContentMeasurer for WrappingText {
    fn measure_intrinsic(&self, _node: NodeId, width: SizeHint) -> Size {
        let chars = self.chars as i32;
        if chars == 0 {
            return Size::ZERO;
        }
        let per_line = match width {
            SizeHint::Exact(available) => (available / self.char_width).clamp(1, chars),
            SizeHint::Unconstrained => chars,
        };
        let lines = (chars + per_line - 1) / per_line;
        Size::new(per_line * self.char_width, lines * self.line_height)
    }
}
