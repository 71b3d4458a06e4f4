/// Placement of a child on the cross axis of a linear layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrossAxisAlignment {
    /// Align to the start of the cross axis (top for a row, left for a column).
    #[default]
    Start,
    /// Align to the center of the cross axis.
    Center,
    /// Align to the end of the cross axis.
    End,
    /// Stretch the child over the whole cross extent.
    Fill,
}

impl CrossAxisAlignment {
    /// Offset of a child of extent `child` inside `available`.
    pub fn align(&self, available: i32, child: i32) -> i32 {
        match self {
            CrossAxisAlignment::Start | CrossAxisAlignment::Fill => 0,
            CrossAxisAlignment::Center => ((available - child) / 2).max(0),
            CrossAxisAlignment::End => (available - child).max(0),
        }
    }

    /// Cross extent a child ends up with.
    pub fn extent(&self, available: i32, child: i32) -> i32 {
        match self {
            CrossAxisAlignment::Fill => available,
            _ => child,
        }
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, CrossAxisAlignment::Fill)
    }
}
