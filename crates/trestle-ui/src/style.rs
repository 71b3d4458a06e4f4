use rustc_hash::FxHashMap;
use trestle_geometry::BoxInsets;

use crate::WidgetKind;

/// Looks up the trim (border plus padding) the theme gives a widget kind.
pub trait StyleProvider {
    fn insets(&self, kind: WidgetKind) -> BoxInsets;
}

/// No trim for any kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unstyled;

impl StyleProvider for Unstyled {
    fn insets(&self, _kind: WidgetKind) -> BoxInsets {
        BoxInsets::ZERO
    }
}

/// A fixed table of insets per kind. Kinds without an entry get no trim.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    insets: FxHashMap<WidgetKind, BoxInsets>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: WidgetKind, insets: BoxInsets) -> Self {
        self.insets.insert(kind, insets);
        self
    }

    pub fn set(&mut self, kind: WidgetKind, insets: BoxInsets) {
        self.insets.insert(kind, insets);
    }
}

impl StyleProvider for StyleSheet {
    fn insets(&self, kind: WidgetKind) -> BoxInsets {
        self.insets.get(&kind).copied().unwrap_or(BoxInsets::ZERO)
    }
}
