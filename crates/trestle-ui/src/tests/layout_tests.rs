use std::rc::Rc;

use super::*;
use crate::test_support::{Event, FailingLayout, FixedContent, Recorder};
use crate::{
    CapabilityKind, ContainerSpec, LeafSpec, LinearLayout, PreconditionViolation, StyleSheet,
    TreeConfig, WidgetKind,
};
use trestle_geometry::BoxInsets;

struct Column {
    tree: WidgetTree,
    recorder: Recorder,
    root: NodeId,
    a: NodeId,
    b: NodeId,
    a_content: Rc<FixedContent>,
    b_content: Rc<FixedContent>,
}

/// A 100x100 column window holding a 10x10 and a 20x5 label.
fn column() -> Column {
    let mut tree = WidgetTree::default();
    let recorder = Recorder::default();
    tree.add_observer(recorder.clone()).unwrap();
    let root = tree
        .create_root(
            ContainerSpec::window()
                .layout(LinearLayout::column())
                .bounds(Rect::new(0, 0, 100, 100)),
        )
        .unwrap();
    let a_content = FixedContent::new(10, 10);
    let b_content = FixedContent::new(20, 5);
    let a = tree
        .create_leaf(root, LeafSpec::label().content(a_content.clone()))
        .unwrap();
    let b = tree
        .create_leaf(root, LeafSpec::label().content(b_content.clone()))
        .unwrap();
    Column {
        tree,
        recorder,
        root,
        a,
        b,
        a_content,
        b_content,
    }
}

#[test]
fn column_places_children_in_order() {
    let c = column();
    assert_eq!(c.tree.bounds(c.a).unwrap(), Rect::new(0, 0, 10, 10));
    assert_eq!(c.tree.bounds(c.b).unwrap(), Rect::new(0, 10, 20, 5));
    assert!(!c.tree.flags(c.root).unwrap().is_layout_needed());
}

#[test]
fn flushed_content_change_moves_siblings() {
    let mut c = column();
    c.recorder.clear();

    c.a_content.set(10, 30);
    c.tree.content_changed(c.a, true).unwrap();

    assert_eq!(c.tree.bounds(c.a).unwrap(), Rect::new(0, 0, 10, 30));
    assert_eq!(c.tree.bounds(c.b).unwrap(), Rect::new(0, 30, 20, 5));
    assert_eq!(c.recorder.laid_out(), vec![c.root]);
}

#[test]
fn unflushed_content_change_keeps_cached_size() {
    let mut c = column();
    c.a_content.set(10, 30);
    c.tree.content_changed(c.a, false).unwrap();
    assert_eq!(c.tree.bounds(c.a).unwrap(), Rect::new(0, 0, 10, 10));

    c.tree.layout(c.root, true, false).unwrap();
    assert_eq!(c.tree.bounds(c.a).unwrap(), Rect::new(0, 0, 10, 30));
    assert_eq!(c.tree.bounds(c.b).unwrap(), Rect::new(0, 30, 20, 5));
}

#[test]
fn exact_hints_are_echoed_without_measuring() {
    let mut c = column();
    let calls = c.a_content.calls();

    let size = c
        .tree
        .measure(c.a, SizeHint::Exact(7), SizeHint::Exact(9), true)
        .unwrap();
    assert_eq!(size, Size::new(7, 9));
    assert_eq!(c.a_content.calls(), calls);

    let size = c
        .tree
        .measure(c.b, SizeHint::Exact(50), SizeHint::Unconstrained, false)
        .unwrap();
    assert_eq!(size, Size::new(50, 5));
}

#[test]
fn negative_hint_is_rejected() {
    let mut c = column();
    let err = c
        .tree
        .measure(c.a, SizeHint::Exact(-1), SizeHint::Unconstrained, false)
        .unwrap_err();
    assert!(matches!(
        err,
        TreeError::Precondition(PreconditionViolation::NegativeHint { .. })
    ));
}

#[test]
fn repeated_layout_does_not_move_anything() {
    let mut c = column();
    c.recorder.clear();

    c.tree.layout(c.root, false, false).unwrap();
    c.tree.layout(c.root, false, false).unwrap();

    assert_eq!(c.recorder.laid_out(), vec![c.root, c.root]);
    assert!(!c
        .recorder
        .events()
        .iter()
        .any(|event| matches!(event, Event::Geometry(..))));
    assert_eq!(c.tree.bounds(c.b).unwrap(), Rect::new(0, 10, 20, 5));
}

#[test]
fn suspended_additions_are_laid_out_once_on_resume() {
    let mut c = column();
    c.recorder.clear();

    assert_eq!(c.tree.suspend(c.root).unwrap(), 1);
    let d = c
        .tree
        .create_leaf(c.root, LeafSpec::label().content(FixedContent::new(10, 10)))
        .unwrap();
    let e = c
        .tree
        .create_leaf(c.root, LeafSpec::label().content(FixedContent::new(10, 10)))
        .unwrap();

    assert!(c.recorder.laid_out().is_empty());
    assert!(c.tree.is_layout_deferred(d).unwrap());
    assert_eq!(c.tree.bounds(d).unwrap(), Rect::ZERO);
    assert!(c.tree.flags(c.root).unwrap().has_dirty_descendant());

    assert_eq!(c.tree.resume(c.root).unwrap(), Resumed::Flush);
    assert_eq!(c.recorder.laid_out(), vec![c.root]);
    assert_eq!(c.tree.bounds(d).unwrap(), Rect::new(0, 15, 10, 10));
    assert_eq!(c.tree.bounds(e).unwrap(), Rect::new(0, 25, 10, 10));
    assert!(!c.tree.flags(c.root).unwrap().needs_visit());
}

#[test]
fn nested_suspension_flushes_on_last_resume() {
    let mut c = column();
    c.tree.suspend(c.root).unwrap();
    c.tree.suspend(c.root).unwrap();
    c.tree.content_changed(c.a, true).unwrap();

    let flags = c.tree.flags(c.root).unwrap();
    assert!(flags.is_layout_needed());
    assert!(flags.is_layout_changed());

    assert_eq!(c.tree.resume(c.root).unwrap(), Resumed::StillDeferred(1));
    assert_eq!(c.tree.resume(c.root).unwrap(), Resumed::Flush);
    assert!(!c.tree.flags(c.root).unwrap().is_layout_changed());

    let err = c.tree.resume(c.root).unwrap_err();
    assert_eq!(
        err,
        TreeError::Precondition(PreconditionViolation::UnbalancedResume { id: c.root })
    );
}

#[test]
fn resume_without_pending_work_is_idle() {
    let mut c = column();
    c.tree.suspend(c.root).unwrap();
    assert_eq!(c.tree.resume(c.root).unwrap(), Resumed::Idle);
}

#[test]
fn deferred_body_error_still_resumes() {
    let mut c = column();
    let result = c.tree.with_layout_deferred(c.root, |tree| {
        tree.create_leaf(c.root, LeafSpec::button().content(FixedContent::new(4, 4)))?;
        Err::<(), _>(TreeError::missing(42))
    });

    assert_eq!(result.unwrap_err(), TreeError::missing(42));
    assert_eq!(c.tree.deferral_depth(c.root).unwrap(), 0);
    let added = c.tree.children(c.root).unwrap()[2];
    assert_eq!(c.tree.bounds(added).unwrap(), Rect::new(0, 15, 4, 4));
}

#[test]
fn arrange_of_suspended_node_only_records_work() {
    let mut c = column();
    c.tree.suspend(c.root).unwrap();
    c.tree.content_changed(c.a, true).unwrap();
    assert!(!c.tree.arrange(c.root, false).unwrap());
    assert!(c.tree.flags(c.root).unwrap().is_layout_needed());
    assert!(!c.tree.arrange(c.a, false).unwrap());
}

struct Nested {
    tree: WidgetTree,
    recorder: Recorder,
    root: NodeId,
    left: NodeId,
    right: NodeId,
    left_leaf: NodeId,
}

fn nested() -> Nested {
    let mut tree = WidgetTree::default();
    let recorder = Recorder::default();
    tree.add_observer(recorder.clone()).unwrap();
    let root = tree
        .create_root(
            ContainerSpec::window()
                .layout(LinearLayout::column())
                .bounds(Rect::new(0, 0, 100, 100)),
        )
        .unwrap();
    let left = tree
        .create_container(root, ContainerSpec::panel().layout(LinearLayout::column()))
        .unwrap();
    let right = tree
        .create_container(root, ContainerSpec::panel().layout(LinearLayout::column()))
        .unwrap();
    let left_leaf = tree
        .create_leaf(left, LeafSpec::label().content(FixedContent::new(10, 10)))
        .unwrap();
    tree.create_leaf(right, LeafSpec::label().content(FixedContent::new(10, 10)))
        .unwrap();
    tree.layout(root, true, true).unwrap();
    recorder.clear();
    Nested {
        tree,
        recorder,
        root,
        left,
        right,
        left_leaf,
    }
}

#[test]
fn full_layout_visits_every_container_once() {
    let mut n = nested();
    n.tree
        .layout_with(
            n.root,
            LayoutRequest::new().flags(LayoutFlags::ALL | LayoutFlags::CHANGED),
        )
        .unwrap();

    assert_eq!(n.recorder.laid_out(), vec![n.root, n.left, n.right]);
    assert_eq!(n.tree.bounds(n.left).unwrap(), Rect::new(0, 0, 10, 10));
    assert_eq!(n.tree.bounds(n.right).unwrap(), Rect::new(0, 10, 10, 10));
    for id in [n.root, n.left, n.right] {
        assert!(!n.tree.flags(id).unwrap().needs_visit());
    }
}

#[test]
fn targeted_layout_skips_unrelated_branches() {
    let mut n = nested();
    n.tree.layout_nodes(n.root, &[n.left_leaf]).unwrap();
    assert_eq!(n.recorder.laid_out(), vec![n.root, n.left]);
}

#[test]
fn targeted_layout_rejects_foreign_targets() {
    let mut n = nested();
    let other = n.tree.create_root(ContainerSpec::window()).unwrap();
    let err = n.tree.layout_nodes(n.left, &[n.left_leaf, other]).unwrap_err();
    assert_eq!(
        err,
        TreeError::InvalidParent {
            node: other,
            container: n.left
        }
    );
    assert!(!n.tree.flags(n.left).unwrap().is_layout_needed());
    assert!(n.recorder.laid_out().is_empty());
}

#[test]
fn deferred_request_runs_later() {
    let mut c = column();
    c.a_content.set(10, 30);
    c.tree.request_layout(c.a).unwrap();

    assert!(c.tree.is_layout_deferred(c.a).unwrap());
    assert_eq!(c.tree.bounds(c.a).unwrap(), Rect::new(0, 0, 10, 10));

    assert_eq!(c.tree.run_deferred_layouts().unwrap(), 1);
    assert_eq!(c.tree.bounds(c.a).unwrap(), Rect::new(0, 0, 10, 30));
    assert_eq!(c.tree.bounds(c.b).unwrap(), Rect::new(0, 30, 20, 5));
    assert_eq!(c.tree.run_deferred_layouts().unwrap(), 0);
}

#[test]
fn failing_strategy_is_restored() {
    let mut tree = WidgetTree::default();
    let root = tree
        .create_root(ContainerSpec::panel().layout(FailingLayout))
        .unwrap();

    let err = tree.layout(root, false, false).unwrap_err();
    assert!(matches!(err, TreeError::Strategy { node, .. } if node == root));
    assert!(tree
        .widget(root)
        .unwrap()
        .capabilities()
        .has(CapabilityKind::Layout));
    assert!(!tree.arrange(root, false).unwrap());
}

#[test]
fn pack_resizes_to_preferred_size() {
    let mut c = column();
    assert_eq!(c.tree.pack(c.b, false).unwrap(), Size::new(20, 5));
    assert_eq!(c.tree.pack(c.root, false).unwrap(), Size::new(20, 15));
    assert_eq!(c.tree.bounds(c.root).unwrap(), Rect::new(0, 0, 20, 15));
    assert_eq!(c.tree.bounds(c.a).unwrap(), Rect::new(0, 0, 10, 10));
}

#[test]
fn leaf_without_content_uses_default_size() {
    let mut tree = WidgetTree::new(TreeConfig::default().with_default_size(Size::new(8, 6)));
    let root = tree
        .create_root(ContainerSpec::window().layout(LinearLayout::row()))
        .unwrap();
    let leaf = tree.create_leaf(root, LeafSpec::image()).unwrap();
    let size = tree
        .measure(leaf, SizeHint::Unconstrained, SizeHint::Unconstrained, false)
        .unwrap();
    assert_eq!(size, Size::new(8, 6));
}

#[test]
fn container_without_strategy_measures_children_extent() {
    let mut tree = WidgetTree::default();
    let group = tree.create_root(ContainerSpec::group()).unwrap();
    let unconstrained = SizeHint::Unconstrained;
    assert_eq!(
        tree.measure(group, unconstrained, unconstrained, false).unwrap(),
        Size::new(64, 64)
    );

    tree.create_leaf(group, LeafSpec::label().bounds(Rect::new(5, 5, 10, 10)))
        .unwrap();
    assert_eq!(
        tree.measure(group, unconstrained, unconstrained, false).unwrap(),
        Size::new(15, 15)
    );
}

#[test]
fn trim_inflates_measured_size() {
    let style = StyleSheet::new().with(WidgetKind::Label, BoxInsets::uniform(2));
    let mut tree = WidgetTree::default().with_style(Rc::new(style));
    let root = tree
        .create_root(ContainerSpec::window().layout(LinearLayout::column()))
        .unwrap();
    let label = tree
        .create_leaf(root, LeafSpec::label().content(FixedContent::new(10, 10)))
        .unwrap();

    let size = tree
        .measure(label, SizeHint::Unconstrained, SizeHint::Unconstrained, false)
        .unwrap();
    assert_eq!(size, Size::new(14, 14));
    let size = tree
        .measure(label, SizeHint::Exact(30), SizeHint::Unconstrained, false)
        .unwrap();
    assert_eq!(size, Size::new(30, 14));
}

#[test]
fn leaf_measure_is_memoized() {
    let mut c = column();
    let calls = c.b_content.calls();
    let unconstrained = SizeHint::Unconstrained;
    c.tree.measure(c.b, unconstrained, unconstrained, false).unwrap();
    c.tree.measure(c.b, unconstrained, unconstrained, false).unwrap();
    assert_eq!(c.b_content.calls(), calls);

    c.tree.measure(c.b, unconstrained, unconstrained, true).unwrap();
    assert_eq!(c.b_content.calls(), calls + 1);
    assert!(!c.tree.flags(c.b).unwrap().contains(NodeFlags::LAYOUT_NEEDED));
}

#[test]
fn strategy_less_extent_counts_trim_once() {
    let style = StyleSheet::new().with(WidgetKind::Group, BoxInsets::uniform(5));
    let mut tree = WidgetTree::default().with_style(Rc::new(style));
    let group = tree
        .create_root(ContainerSpec::group().bounds(Rect::new(0, 0, 100, 100)))
        .unwrap();
    tree.create_leaf(group, LeafSpec::label().bounds(Rect::new(5, 5, 90, 90)))
        .unwrap();
    assert_eq!(tree.client_area(group).unwrap(), Rect::new(5, 5, 90, 90));

    let unconstrained = SizeHint::Unconstrained;
    assert_eq!(
        tree.measure(group, unconstrained, unconstrained, false).unwrap(),
        Size::new(100, 100)
    );
}
