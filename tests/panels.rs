//! Panel lifecycle, focus and z-order tests

mod common;

use common::{
    add_panel, count_reorders, events, rect_of, runtime_with_root, test_runtime, z_order, Clock,
    TestPanel,
};
use panelkit::{
    update, Msg, PanelEvent, PanelId, PanelMsg, PanelState, Rect, RootId, RuntimeError, Vec2,
};

// ========================================================================
// Lifecycle
// ========================================================================

#[test]
fn test_create_panel_applies_defaults_and_activates() {
    let (mut rt, root) = runtime_with_root();
    let panel = TestPanel::new("inspector");
    let log = panel.log();

    let id = rt.create_panel(&root, Box::new(panel)).unwrap();
    assert_eq!(
        events(&mut rt),
        vec![
            PanelEvent::Created { panel: id.clone() },
            PanelEvent::ActiveChanged {
                panel: id.clone(),
                active: true
            },
            PanelEvent::PanelsReordered,
        ]
    );

    let p = rt.panel(&root, &id).unwrap();
    assert_eq!(p.state(), PanelState::Active);
    assert!(p.is_enabled());
    assert_eq!(p.rect(), Rect::new(400.0, 350.0, 200.0, 100.0));
    assert_eq!(*log.borrow(), vec!["construct", "active=true"]);
}

#[test]
fn test_late_construct_runs_once_on_next_tick() {
    let (mut rt, root) = runtime_with_root();
    let panel = TestPanel::new("inspector");
    let log = panel.log();
    let id = add_panel(&mut rt, &root, panel);

    assert!(!rt.panel(&root, &id).unwrap().is_late_constructed());
    let mut clock = Clock::new();
    clock.idle(&mut rt, 0.0, 0.0);
    assert!(rt.panel(&root, &id).unwrap().is_late_constructed());
    clock.idle(&mut rt, 0.0, 0.0);

    let late = log.borrow().iter().filter(|e| *e == "construct_late").count();
    assert_eq!(late, 1);
}

#[test]
fn test_construction_failure_keeps_panel_registered() {
    let (mut rt, root) = runtime_with_root();
    let panel = TestPanel::new("broken").failing();
    let log = panel.log();
    let id = add_panel(&mut rt, &root, panel);

    let p = rt.panel(&root, &id).unwrap();
    assert!(p.construction_failed());
    assert!(p.is_enabled());

    Clock::new().idle(&mut rt, 0.0, 0.0);
    assert!(!log.borrow().iter().any(|e| e == "construct_late"));
}

#[test]
fn test_min_size_enforced_at_construction() {
    let (mut rt, root) = runtime_with_root();
    let id = add_panel(&mut rt, &root, TestPanel::new("tiny").size(50.0, 20.0).min(100.0, 60.0));
    assert_eq!(rect_of(&rt, &root, &id).size(), Vec2::new(100.0, 60.0));
}

#[test]
fn test_position_clamped_at_construction() {
    let (mut rt, root) = runtime_with_root();
    let id = add_panel(&mut rt, &root, TestPanel::new("offscreen").at(600.0, -500.0));
    assert_eq!(rect_of(&rt, &root, &id), Rect::new(800.0, 0.0, 200.0, 100.0));
}

#[test]
fn test_duplicate_panel_and_unknown_root_are_errors() {
    let (mut rt, root) = runtime_with_root();
    add_panel(&mut rt, &root, TestPanel::new("a"));

    let err = rt.create_panel(&root, Box::new(TestPanel::new("a"))).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::DuplicatePanel {
            root: root.clone(),
            panel: PanelId::from("a"),
        }
    );
    assert_eq!(rt.manager(&root).unwrap().len(), 1);

    let ghost = RootId::from("ghost");
    let err = rt.create_panel(&ghost, Box::new(TestPanel::new("b"))).unwrap_err();
    assert_eq!(err, RuntimeError::UnknownRoot { root: ghost });
}

#[test]
fn test_destroy_unregisters_and_runs_hook() {
    let (mut rt, root) = runtime_with_root();
    let panel = TestPanel::new("doomed");
    let log = panel.log();
    let id = add_panel(&mut rt, &root, panel);

    rt.destroy_panel(&root, &id).unwrap();
    assert_eq!(events(&mut rt), vec![PanelEvent::Destroyed { panel: id.clone() }]);
    assert!(rt.panel(&root, &id).is_none());
    assert_eq!(log.borrow().last().map(String::as_str), Some("destroy"));

    // Late construction was still queued; it must find nothing to do
    Clock::new().idle(&mut rt, 0.0, 0.0);
    assert!(!log.borrow().iter().any(|e| e == "construct_late"));

    assert!(matches!(
        rt.destroy_panel(&root, &id),
        Err(RuntimeError::UnknownPanel { .. })
    ));
}

// ========================================================================
// Active state
// ========================================================================

#[test]
fn test_set_active_is_idempotent() {
    let (mut rt, root) = runtime_with_root();
    let id = add_panel(&mut rt, &root, TestPanel::new("a"));

    let changed = rt.with_manager(&root, |m| m.set_active(&id, true)).unwrap();
    assert!(!changed);
    assert!(events(&mut rt).is_empty());

    assert!(rt.with_manager(&root, |m| m.set_active(&id, false)).unwrap());
    assert!(!rt.with_manager(&root, |m| m.set_active(&id, false)).unwrap());
    assert_eq!(
        events(&mut rt),
        vec![PanelEvent::ActiveChanged {
            panel: id.clone(),
            active: false
        }]
    );
    assert_eq!(rt.panel(&root, &id).unwrap().state(), PanelState::Inactive);
}

#[test]
fn test_activation_raises_and_reports_reorder() {
    let (mut rt, root) = runtime_with_root();
    let a = add_panel(&mut rt, &root, TestPanel::new("a"));
    add_panel(&mut rt, &root, TestPanel::new("b"));

    rt.with_manager(&root, |m| m.set_active(&a, false)).unwrap();
    rt.with_manager(&root, |m| m.set_active(&a, true)).unwrap();
    assert_eq!(z_order(&rt, &root), vec!["b", "a"]);
    assert_eq!(count_reorders(&events(&mut rt)), 1);
}

#[test]
fn test_set_active_only_keeps_z_order() {
    let (mut rt, root) = runtime_with_root();
    let a = add_panel(&mut rt, &root, TestPanel::new("a"));
    add_panel(&mut rt, &root, TestPanel::new("b"));

    rt.with_manager(&root, |m| m.set_active_only(&a, false)).unwrap();
    rt.with_manager(&root, |m| m.set_active_only(&a, true)).unwrap();
    assert_eq!(z_order(&rt, &root), vec!["a", "b"]);
    assert_eq!(count_reorders(&events(&mut rt)), 0);
}

#[test]
fn test_toggle_through_update() {
    let (mut rt, root) = runtime_with_root();
    let id = add_panel(&mut rt, &root, TestPanel::new("a"));
    let msg = Msg::Panel(PanelMsg::Toggle {
        root: root.clone(),
        panel: id.clone(),
    });

    update(&mut rt, msg.clone()).unwrap();
    assert!(!rt.panel(&root, &id).unwrap().is_enabled());
    update(&mut rt, msg).unwrap();
    assert!(rt.panel(&root, &id).unwrap().is_enabled());
}

#[test]
fn test_reset_to_default_restores_geometry() {
    let (mut rt, root) = runtime_with_root();
    let id = add_panel(&mut rt, &root, TestPanel::new("a"));
    let mut clock = Clock::new();
    clock.drag(&mut rt, (500.0, 360.0), (100.0, 60.0), 3);
    assert_ne!(rect_of(&rt, &root, &id), Rect::new(400.0, 350.0, 200.0, 100.0));

    update(
        &mut rt,
        Msg::Panel(PanelMsg::ResetToDefault {
            root: root.clone(),
            panel: id.clone(),
        }),
    )
    .unwrap();
    assert_eq!(rect_of(&rt, &root, &id), Rect::new(400.0, 350.0, 200.0, 100.0));
}

// ========================================================================
// Focus and z-order
// ========================================================================

/// B at (100, 350), A at (700, 350); A created last so it is topmost
fn side_by_side() -> (panelkit::Runtime, RootId) {
    let (mut rt, root) = runtime_with_root();
    add_panel(&mut rt, &root, TestPanel::new("b").at(-300.0, 0.0));
    add_panel(&mut rt, &root, TestPanel::new("a").at(300.0, 0.0));
    (rt, root)
}

#[test]
fn test_click_on_lower_panel_raises_it_once() {
    let (mut rt, root) = side_by_side();
    assert_eq!(z_order(&rt, &root), vec!["b", "a"]);
    let mut clock = Clock::new();

    clock.press(&mut rt, 200.0, 420.0);
    clock.release(&mut rt, 200.0, 420.0);
    assert_eq!(z_order(&rt, &root), vec!["a", "b"]);
    assert_eq!(count_reorders(&events(&mut rt)), 1);

    clock.press(&mut rt, 200.0, 420.0);
    clock.release(&mut rt, 200.0, 420.0);
    assert_eq!(count_reorders(&events(&mut rt)), 0);
}

#[test]
fn test_title_bar_press_on_lower_panel_reorders_once() {
    let (mut rt, root) = side_by_side();
    let mut clock = Clock::new();
    // Focus raises, then the drag start finds the panel already on top
    clock.press(&mut rt, 200.0, 365.0);
    assert_eq!(count_reorders(&events(&mut rt)), 1);
    assert!(rt.manager(&root).unwrap().is_interacting());
    clock.release(&mut rt, 200.0, 365.0);
}

#[test]
fn test_click_outside_reports_and_keeps_order() {
    let (mut rt, root) = side_by_side();
    let mut clock = Clock::new();
    clock.press(&mut rt, 20.0, 20.0);
    let evs = events(&mut rt);
    assert_eq!(evs, vec![PanelEvent::ClickedOutsidePanels]);
    assert_eq!(z_order(&rt, &root), vec!["b", "a"]);
}

#[test]
fn test_overlap_click_goes_to_topmost() {
    let (mut rt, root) = runtime_with_root();
    add_panel(&mut rt, &root, TestPanel::new("under"));
    add_panel(&mut rt, &root, TestPanel::new("over").at(50.0, 20.0));
    let mut clock = Clock::new();

    // Inside both
    clock.press(&mut rt, 520.0, 420.0);
    assert_eq!(count_reorders(&events(&mut rt)), 0);
    assert_eq!(z_order(&rt, &root), vec!["under", "over"]);
}

#[test]
fn test_inactive_panels_are_not_hit() {
    let (mut rt, root) = side_by_side();
    let a = PanelId::from("a");
    rt.with_manager(&root, |m| m.set_active(&a, false)).unwrap();
    events(&mut rt);

    let mut clock = Clock::new();
    clock.press(&mut rt, 800.0, 420.0);
    assert_eq!(events(&mut rt), vec![PanelEvent::ClickedOutsidePanels]);
}

#[test]
fn test_bring_to_front() {
    let (mut rt, root) = side_by_side();
    let b = PanelId::from("b");
    assert!(rt.with_manager(&root, |m| m.bring_to_front(&b)).unwrap());
    assert!(!rt.with_manager(&root, |m| m.bring_to_front(&b)).unwrap());
    assert_eq!(z_order(&rt, &root), vec!["a", "b"]);
    assert_eq!(count_reorders(&events(&mut rt)), 1);
}

// ========================================================================
// Multiple roots
// ========================================================================

fn two_roots() -> (panelkit::Runtime, RootId, RootId) {
    let mut rt = test_runtime();
    let back = RootId::from("back");
    let front = RootId::from("front");
    rt.create_root(back.clone()).unwrap();
    rt.create_root(front.clone()).unwrap();
    add_panel(&mut rt, &back, TestPanel::new("under"));
    add_panel(&mut rt, &front, TestPanel::new("over"));
    (rt, back, front)
}

#[test]
fn test_top_root_claims_pointer() {
    let (mut rt, back, front) = two_roots();
    let mut clock = Clock::new();
    clock.drag(&mut rt, (500.0, 360.0), (600.0, 360.0), 2);

    let all = rt.drain_events();
    assert!(all.iter().all(|e| e.root == front));
    assert!(all
        .iter()
        .any(|e| matches!(e.event, PanelEvent::FinishedDrag { .. })));
    assert_eq!(rect_of(&rt, &front, &PanelId::from("over")).x, 500.0);
    assert_eq!(rect_of(&rt, &back, &PanelId::from("under")).x, 400.0);
}

#[test]
fn test_root_order_and_disabled_roots() {
    let (mut rt, back, front) = two_roots();
    assert!(rt.bring_root_to_front(&back).unwrap());
    assert_eq!(rt.root_order(), vec![front.clone(), back.clone()]);

    rt.set_root_enabled(&back, false).unwrap();
    let mut clock = Clock::new();
    clock.drag(&mut rt, (500.0, 360.0), (600.0, 360.0), 2);
    assert_eq!(rect_of(&rt, &front, &PanelId::from("over")).x, 500.0);
    assert_eq!(rect_of(&rt, &back, &PanelId::from("under")).x, 400.0);
}

#[test]
fn test_remove_root_destroys_panels() {
    let (mut rt, back, _front) = two_roots();
    rt.remove_root(&back).unwrap();
    let all = rt.drain_events();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].root, back);
    assert_eq!(
        all[0].event,
        PanelEvent::Destroyed {
            panel: PanelId::from("under")
        }
    );
    assert!(rt.root(&back).is_none());
    assert_eq!(
        rt.create_root("front"),
        Err(RuntimeError::DuplicateRoot {
            root: RootId::from("front")
        })
    );
}

// ========================================================================
// Screen changes
// ========================================================================

#[test]
fn test_ui_scale_converts_pointer_to_root_space() {
    let (mut rt, root) = runtime_with_root();
    let id = add_panel(&mut rt, &root, TestPanel::new("a"));
    rt.set_ui_scale(2.0);

    let mut clock = Clock::new();
    // Root (500, 360) is in the title bar
    clock.drag(&mut rt, (1000.0, 720.0), (1200.0, 720.0), 2);
    assert_eq!(rect_of(&rt, &root, &id), Rect::new(500.0, 350.0, 200.0, 100.0));
}

#[test]
fn test_reference_resolution_change_reclamps_panels() {
    let (mut rt, root) = runtime_with_root();
    let id = add_panel(&mut rt, &root, TestPanel::new("a").at(300.0, 0.0));
    rt.set_reference_resolution(Vec2::new(500.0, 400.0));

    let rect = rect_of(&rt, &root, &id);
    assert!(Rect::new(0.0, 0.0, 500.0, 400.0).contains_rect(&rect));
    assert_eq!(rect.right(), 500.0);
}

#[test]
fn test_invalid_reference_resolution_keeps_positions_finite() {
    let (mut rt, root) = runtime_with_root();
    let id = add_panel(&mut rt, &root, TestPanel::new("a"));
    rt.set_reference_resolution(Vec2::new(f32::NAN, -1.0));

    assert_eq!(rt.screen().reference_resolution, Vec2::new(1920.0, 1080.0));
    let rect = rect_of(&rt, &root, &id);
    assert!(rect.x.is_finite() && rect.y.is_finite());
    assert!(Rect::new(0.0, 0.0, 1920.0, 1080.0).contains_rect(&rect));
}
