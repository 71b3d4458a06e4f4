use super::*;
use trestle_ui::{ContentMeasurer, LinearLayout, Rect, Size, SizeHint, StackLayout};

#[test]
fn wrapping_text_wraps_to_width() {
    let text = WrappingText::new(10, 2, 5);
    assert_eq!(
        text.measure_intrinsic(0, SizeHint::Unconstrained),
        Size::new(20, 5)
    );
    assert_eq!(text.measure_intrinsic(0, SizeHint::Exact(8)), Size::new(8, 15));
    assert_eq!(text.measure_intrinsic(0, SizeHint::Exact(1)), Size::new(2, 50));
    assert_eq!(
        WrappingText::new(0, 2, 5).measure_intrinsic(0, SizeHint::Exact(8)),
        Size::ZERO
    );
}

#[test]
fn fixed_content_counts_measurements() {
    let content = FixedContent::new(3, 4);
    assert_eq!(content.measure_intrinsic(1, SizeHint::Unconstrained), Size::new(3, 4));
    content.set(5, 6);
    assert_eq!(content.measure_intrinsic(1, SizeHint::Exact(2)), Size::new(5, 6));
    assert_eq!(content.measure_count(), 2);
}

#[test]
fn rule_records_layout_passes() {
    let mut rule = TreeTestRule::new();
    let (layout, counter) = CountingStrategy::new(LinearLayout::column());
    let root = rule.window(layout, 50, 50).unwrap();
    let (label, _) = rule.label(root, 10, 10).unwrap();

    assert_eq!(rule.root_id(), Some(root));
    assert_eq!(counter.arranges(), 1);
    assert_eq!(rule.recorder().laid_out_count(root), 1);
    rule.assert_bounds(label, Rect::new(0, 0, 10, 10));
    assert_eq!(
        rule.snapshot().unwrap(),
        vec![(root, Rect::new(0, 0, 50, 50)), (label, Rect::new(0, 0, 10, 10))]
    );
}

#[test]
fn recorder_take_drains_the_log() {
    let mut rule = TreeTestRule::new();
    let root = rule.window(StackLayout::new(), 20, 20).unwrap();
    rule.label(root, 1, 1).unwrap();

    assert!(!rule.recorder().take().is_empty());
    assert!(rule.recorder().is_empty());
}

#[test]
fn failing_strategy_reports_its_container() {
    let mut rule = TreeTestRule::new();
    let root = rule
        .window(FailingStrategy::on_arrange("no room"), 20, 20)
        .unwrap();
    let err = rule.tree_mut().layout(root, false, false).unwrap_err();
    assert_eq!(
        err,
        trestle_ui::TreeError::strategy(root, "FailingStrategy", "no room")
    );
}

#[test]
#[should_panic(expected = "expected bounds")]
fn assert_bounds_panics_on_mismatch() {
    let mut rule = TreeTestRule::new();
    let root = rule.window(StackLayout::new(), 20, 20).unwrap();
    rule.assert_bounds(root, Rect::new(1, 1, 1, 1));
}
