use std::rc::Rc;

use trestle_ui::{
    ContainerSpec, LayoutStrategy, LeafSpec, NodeId, Rect, StyleProvider, TreeConfig, TreeResult,
    WidgetTree,
};

use crate::{EventRecorder, FixedContent};

/// Headless harness for exercising a widget tree in tests.
///
/// Owns a [`WidgetTree`] with an [`EventRecorder`] already attached and
/// offers shorthands for building the usual fixtures: a window of a given
/// size, panels and labels with fixed content.
pub struct TreeTestRule {
    tree: WidgetTree,
    recorder: EventRecorder,
    root: Option<NodeId>,
}

impl Default for TreeTestRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeTestRule {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self::from_tree(WidgetTree::new(config))
    }

    /// Uses `style` for every trim lookup.
    pub fn with_style(style: Rc<dyn StyleProvider>) -> Self {
        Self::from_tree(WidgetTree::default().with_style(style))
    }

    fn from_tree(mut tree: WidgetTree) -> Self {
        let recorder = EventRecorder::new();
        if let Err(err) = tree.add_observer(recorder.clone()) {
            log::warn!("test rule could not attach its recorder: {err}");
        }
        Self {
            tree,
            recorder,
            root: None,
        }
    }

    /// Creates the root the rule reports from [`root_id`](Self::root_id).
    pub fn set_root(&mut self, spec: ContainerSpec) -> TreeResult<NodeId> {
        let root = self.tree.create_root(spec)?;
        self.root = Some(root);
        Ok(root)
    }

    /// A `width` x `height` window at the origin, laid out by `layout`.
    pub fn window(
        &mut self,
        layout: impl LayoutStrategy + 'static,
        width: i32,
        height: i32,
    ) -> TreeResult<NodeId> {
        self.set_root(
            ContainerSpec::window()
                .layout(layout)
                .bounds(Rect::new(0, 0, width, height)),
        )
    }

    pub fn panel(
        &mut self,
        parent: NodeId,
        layout: impl LayoutStrategy + 'static,
    ) -> TreeResult<NodeId> {
        self.tree
            .create_container(parent, ContainerSpec::panel().layout(layout))
    }

    /// A label whose content reports `width` x `height`.
    pub fn label(
        &mut self,
        parent: NodeId,
        width: i32,
        height: i32,
    ) -> TreeResult<(NodeId, Rc<FixedContent>)> {
        let content = FixedContent::new(width, height);
        let id = self
            .tree
            .create_leaf(parent, LeafSpec::label().content(content.clone()))?;
        Ok((id, content))
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    /// Bounds of every live node under the root, parents first.
    pub fn snapshot(&self) -> TreeResult<Vec<(NodeId, Rect)>> {
        let Some(root) = self.root else {
            return Ok(Vec::new());
        };
        self.tree
            .descendants(root)?
            .into_iter()
            .map(|id| Ok((id, self.tree.bounds(id)?)))
            .collect()
    }

    /// Panics with a dump of the tree when `id` is not at `expected`.
    pub fn assert_bounds(&self, id: NodeId, expected: Rect) {
        match self.tree.bounds(id) {
            Ok(actual) if actual == expected => {}
            Ok(actual) => panic!(
                "node {id}: expected bounds {expected}, got {actual}\n{}",
                self.dump_tree()
            ),
            Err(err) => panic!("node {id}: {err}\n{}", self.dump_tree()),
        }
    }

    pub fn dump_tree(&self) -> String {
        self.tree
            .dump_tree(self.root)
            .unwrap_or_else(|err| format!("(tree unavailable: {err})\n"))
    }
}
