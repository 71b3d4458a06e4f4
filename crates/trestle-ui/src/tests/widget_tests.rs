use super::*;
use crate::test_support::FixedContent;
use crate::StackLayout;

#[test]
fn only_window_panel_and_group_hold_children() {
    assert!(WidgetKind::Window.is_container());
    assert!(WidgetKind::Panel.is_container());
    assert!(WidgetKind::Group.is_container());
    for kind in [
        WidgetKind::Label,
        WidgetKind::Button,
        WidgetKind::TextField,
        WidgetKind::Image,
    ] {
        assert!(!kind.is_container(), "{kind} should be a leaf");
    }
    assert_eq!(WidgetKind::TextField.to_string(), "TextField");
}

#[test]
fn container_spec_installs_layout() {
    let widget = ContainerSpec::panel()
        .layout(StackLayout::new())
        .bounds(Rect::new(1, 2, 30, 40))
        .build();

    assert_eq!(widget.kind(), WidgetKind::Panel);
    assert!(widget.has_layout());
    assert!(widget.capabilities().has(CapabilityKind::Layout));
    assert!(!widget.capabilities().has(CapabilityKind::Release));
    assert_eq!(widget.bounds(), Rect::new(1, 2, 30, 40));
    assert!(widget.is_visible());
}

#[test]
fn leaf_spec_installs_content_and_clamps_bounds() {
    let widget = LeafSpec::label()
        .content(FixedContent::new(5, 5))
        .bounds(Rect {
            x: 3,
            y: 4,
            width: -10,
            height: 7,
        })
        .build();

    assert!(widget.capabilities().has(CapabilityKind::Content));
    assert!(!widget.has_layout());
    assert_eq!(widget.bounds(), Rect::new(3, 4, 0, 7));
}

#[test]
fn hidden_widgets_do_not_participate() {
    let widget = LeafSpec::image().visible(false).build();
    assert!(!widget.participates());
}

#[test]
fn flush_cache_without_strategy_reports_nothing() {
    let mut widget = ContainerSpec::group().build();
    assert!(!widget.flush_cache(7));
}

#[test]
fn invalidate_intrinsic_drops_memo() {
    let mut widget = LeafSpec::label().build();
    widget.intrinsic = Some(IntrinsicMemo {
        width: SizeHint::Unconstrained,
        size: Size::new(4, 4),
    });
    widget.invalidate_intrinsic();
    assert_eq!(widget.intrinsic, None);
}

#[test]
fn release_hook_accepts_closures() {
    let mut widget = LeafSpec::button()
        .on_release(|node: NodeId| -> Result<(), String> { Err(format!("node {node} busy")) })
        .build();
    let hook = widget.capabilities.release_mut().expect("release hook");
    assert_eq!(hook.release(4), Err("node 4 busy".to_string()));
}

#[test]
fn client_area_is_local_and_excludes_trim() {
    let widget = ContainerSpec::window()
        .bounds(Rect::new(50, 50, 100, 40))
        .build();
    assert_eq!(
        widget.client_area_with(BoxInsets::uniform(4)),
        Rect::new(4, 4, 92, 32)
    );
}
