use approx::assert_relative_eq;
use glam::Vec3;
use serde_json::Value;
use splat_editor::selection::{points_in_box, select_by_box, BoxRegion, SelectionMode};
use splat_editor::splat::{ColorBand, Splat, SplatHandle, SplatPoint};
use splat_editor::tools::{BoxSelectionTool, Tool, ToolType};
use splat_editor::{Command, EditorConfig, EditorEvent, EditorSession, EventKind, Events};
use std::cell::RefCell;
use std::rc::Rc;

fn record(events: &Events, kind: EventKind) -> Rc<RefCell<Vec<EditorEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    events.on(kind, move |event| {
        sink.borrow_mut().push(event.clone());
        Ok(())
    });
    log
}

fn two_point_splat() -> Splat {
    Splat::new(
        "pair",
        vec![
            SplatPoint::new(Vec3::ZERO, [0.5, 0.5, 0.5]),
            SplatPoint::new(Vec3::splat(5.0), [0.5, 0.5, 0.5]),
        ],
    )
}

fn box_tool(session: &EditorSession) -> &BoxSelectionTool {
    session
        .tools()
        .get("BoxSelection")
        .and_then(ToolType::as_box_selection)
        .unwrap()
}

fn session_with_pair() -> (EditorSession, SplatHandle) {
    let mut session = EditorSession::new(EditorConfig::default()).unwrap();
    let splat = session.add_splat(two_point_splat());
    session.select_splat(Some(&splat)).unwrap();
    session.activate_tool("BoxSelection").unwrap();
    {
        let tool = box_tool(&session);
        let mut shape = tool.shape().borrow_mut();
        shape.set_len_x(2.0);
        shape.set_len_y(2.0);
        shape.set_len_z(2.0);
    }
    (session, splat)
}

#[test]
fn test_set_add_remove_through_session() {
    let (session, splat) = session_with_pair();

    session.pick_focal_point(Vec3::ZERO).unwrap();
    box_tool(&session).apply(SelectionMode::Set).unwrap();
    assert_eq!(splat.borrow().selection(), vec![true, false]);

    session.pick_focal_point(Vec3::splat(5.0)).unwrap();
    box_tool(&session).apply(SelectionMode::Add).unwrap();
    assert_eq!(splat.borrow().selection(), vec![true, true]);

    session.pick_focal_point(Vec3::ZERO).unwrap();
    box_tool(&session).apply(SelectionMode::Remove).unwrap();
    assert_eq!(splat.borrow().selection(), vec![false, true]);

    assert_eq!(session.history().undo_stack().len(), 3);
    assert_eq!(session.history().undo_stack()[2].label(), "Selection");

    session.undo().unwrap();
    assert_eq!(splat.borrow().selection(), vec![true, true]);
}

#[test]
fn test_set_add_remove_pure() {
    let positions = [Vec3::ZERO, Vec3::splat(5.0)];
    let at_origin = BoxRegion::new(Vec3::ZERO, Vec3::splat(2.0));
    let at_far = BoxRegion::new(Vec3::splat(5.0), Vec3::splat(2.0));

    let set = select_by_box(&positions, &[false, false], &at_origin, SelectionMode::Set);
    assert_eq!(set, vec![true, false]);
    let added = select_by_box(&positions, &set, &at_far, SelectionMode::Add);
    assert_eq!(added, vec![true, true]);
    let removed = select_by_box(&positions, &added, &at_origin, SelectionMode::Remove);
    assert_eq!(removed, vec![false, true]);

    assert_eq!(points_in_box(&positions, &at_far), vec![1]);
}

#[test]
fn test_select_by_box_payload() {
    let (session, _splat) = session_with_pair();
    let requests = record(session.events(), EventKind::SelectByBox);

    session.pick_focal_point(Vec3::new(1.0, 2.0, 3.0)).unwrap();
    box_tool(&session).apply(SelectionMode::Add).unwrap();

    let requests = requests.borrow();
    assert_eq!(requests.len(), 1);
    match &requests[0] {
        EditorEvent::SelectByBox { mode, params } => {
            assert_eq!(*mode, SelectionMode::Add);
            assert_eq!(*params, [1.0, 2.0, 3.0, 2.0, 2.0, 2.0]);
            assert_eq!(BoxRegion::from_params(*params).to_params(), *params);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_box_extent_is_clamped_to_minimum() {
    let (session, _splat) = session_with_pair();
    let mut shape = box_tool(&session).shape().borrow_mut();

    shape.set_len_y(-1.0);

    assert_relative_eq!(shape.len_y(), EditorConfig::default().min_box_extent);
}

#[test]
fn test_gizmo_size_follows_camera() {
    let (session, _splat) = session_with_pair();

    session.set_ortho(true).unwrap();
    session.resize_viewport(1600.0, 900.0).unwrap();
    assert_relative_eq!(box_tool(&session).gizmo().borrow().size(), 1.25);

    session.set_ortho(false).unwrap();
    session.resize_viewport(800.0, 600.0).unwrap();
    assert_relative_eq!(box_tool(&session).gizmo().borrow().size(), 1.5);
}

#[test]
fn test_inactive_tool_ignores_camera_events() {
    let mut session = EditorSession::new(EditorConfig::default()).unwrap();
    session.activate_tool("BoxSelection").unwrap();
    session.activate_tool("ColorEdit").unwrap();
    let before = box_tool(&session).gizmo().borrow().size();

    session.pick_focal_point(Vec3::splat(3.0)).unwrap();
    session.set_ortho(true).unwrap();

    let tool = box_tool(&session);
    assert!(!tool.gizmo().borrow().is_attached());
    assert_eq!(tool.shape().borrow().pivot.borrow().position, Vec3::ZERO);
    assert_relative_eq!(tool.gizmo().borrow().size(), before);
}

#[test]
fn test_gizmo_lifecycle_follows_activation() {
    let events = Rc::new(Events::new());
    let camera = Rc::new(RefCell::new(Default::default()));
    let mut tool = BoxSelectionTool::new(Rc::clone(&events), camera, &EditorConfig::default());
    assert!(!tool.gizmo().borrow().is_attached());

    tool.activate().unwrap();
    assert!(tool.is_active());
    assert!(tool.in_scene());
    assert!(tool.toolbar_visible());
    assert!(tool
        .gizmo()
        .borrow()
        .is_attached_to(&tool.shape().borrow().pivot));
    assert!(events.is_group_active("BoxSelection"));

    tool.deactivate().unwrap();
    assert!(!tool.is_active());
    assert!(!tool.in_scene());
    assert!(!tool.toolbar_visible());
    assert!(!tool.gizmo().borrow().is_attached());
    assert!(!events.is_group_active("BoxSelection"));
}

#[test]
fn test_gizmo_drag_moves_box() {
    let (session, _splat) = session_with_pair();
    let tool = box_tool(&session);
    let mut gizmo = tool.gizmo().borrow_mut();

    gizmo.begin_drag();
    assert!(gizmo.is_dragging());
    assert!(gizmo.translate(Vec3::new(1.0, 0.0, 0.0)));
    assert!(gizmo.translate(Vec3::new(0.0, 2.0, 0.0)));
    let drag = gizmo.end_drag();

    assert_eq!(drag, Some((Vec3::ZERO, Vec3::new(1.0, 2.0, 0.0))));
    assert_eq!(gizmo.last_drag(), drag);
    assert_eq!(
        tool.shape().borrow().region().center,
        Vec3::new(1.0, 2.0, 0.0)
    );
}

#[test]
fn test_screen_drag_moves_box_in_world() {
    let (session, _splat) = session_with_pair();
    let tool = box_tool(&session);
    tool.gizmo().borrow_mut().set_size(2.0);

    assert!(tool.drag_gizmo(egui::vec2(50.0, 25.0)));

    let center = tool.shape().borrow().region().center;
    assert_relative_eq!(center.x, 1.0);
    assert_relative_eq!(center.y, -0.5);
    assert_relative_eq!(center.z, 0.0);
}

#[test]
fn test_empty_viewport_is_ignored() {
    let (session, _splat) = session_with_pair();
    session.set_ortho(true).unwrap();
    session.resize_viewport(1600.0, 900.0).unwrap();

    session.resize_viewport(1600.0, 0.0).unwrap();

    assert_relative_eq!(session.camera().borrow().viewport_height, 900.0);
    assert_relative_eq!(box_tool(&session).gizmo().borrow().size(), 1.25);
}

#[test]
fn test_only_one_tool_is_active() {
    let mut session = EditorSession::new(EditorConfig::default()).unwrap();
    let activated = record(session.events(), EventKind::ToolActivated);
    let deactivated = record(session.events(), EventKind::ToolDeactivated);

    session.activate_tool("BoxSelection").unwrap();
    session.activate_tool("BoxSelection").unwrap();
    session.activate_tool("ColorEdit").unwrap();

    let active: Vec<_> = session
        .tools()
        .tool_names()
        .into_iter()
        .filter(|name| session.tools().get(name).is_some_and(|tool| tool.is_active()))
        .collect();
    assert_eq!(active, vec!["ColorEdit"]);
    assert_eq!(activated.borrow().len(), 2);
    assert_eq!(deactivated.borrow().len(), 1);
    assert!(!session.events().is_group_active("BoxSelection"));

    session.toggle_tool("ColorEdit").unwrap();
    assert!(session.tools().active_tool().is_none());
    assert_eq!(deactivated.borrow().len(), 2);

    assert!(session.activate_tool("Lasso").is_err());
}

#[test]
fn test_color_edit_publishes_relative_multipliers() {
    let mut session = EditorSession::new(EditorConfig::default()).unwrap();
    let updates = record(session.events(), EventKind::ColorUpdate);
    session.activate_tool("ColorEdit").unwrap();
    let tool = session
        .tools_mut()
        .get_mut("ColorEdit")
        .and_then(ToolType::as_color_edit_mut)
        .unwrap();

    tool.adjust_colors(ColorBand::Red, 2.0).unwrap();
    tool.adjust_colors(ColorBand::Red, 3.0).unwrap();
    assert_relative_eq!(tool.adjustment(ColorBand::Red), 3.0);
    assert_relative_eq!(tool.adjustment(ColorBand::Green), 1.0);

    let multipliers: Vec<f32> = updates
        .borrow()
        .iter()
        .filter_map(|event| match event {
            EditorEvent::ColorUpdate { band, multiplier } if *band == ColorBand::Red => {
                Some(*multiplier)
            }
            _ => None,
        })
        .collect();
    assert_eq!(multipliers.len(), 2);
    assert_relative_eq!(multipliers[0], 2.0);
    assert_relative_eq!(multipliers[1], 1.5);
}

#[test]
fn test_color_update_scales_selected_points_only() {
    let (mut session, splat) = session_with_pair();
    session.pick_focal_point(Vec3::ZERO).unwrap();
    box_tool(&session).apply(SelectionMode::Set).unwrap();

    session.activate_tool("ColorEdit").unwrap();
    session
        .tools_mut()
        .get_mut("ColorEdit")
        .and_then(ToolType::as_color_edit_mut)
        .unwrap()
        .adjust_colors(ColorBand::Green, 2.0)
        .unwrap();

    let splat = splat.borrow();
    assert_relative_eq!(splat.points()[0].color[1], 1.0);
    assert_relative_eq!(splat.points()[1].color[1], 0.5);
    assert_relative_eq!(splat.points()[0].color[0], 0.5);
}

#[test]
fn test_delete_selection_is_undoable() {
    let (mut session, splat) = session_with_pair();
    session.pick_focal_point(Vec3::ZERO).unwrap();
    box_tool(&session).apply(SelectionMode::Set).unwrap();

    assert_eq!(session.delete_selection().unwrap(), 1);
    assert_eq!(splat.borrow().deleted_count(), 1);
    assert_eq!(splat.borrow().selected_count(), 0);
    assert!(matches!(
        session.history().undo_stack().last(),
        Some(Command::DeleteSelection(_))
    ));

    // nothing selected any more
    assert_eq!(session.delete_selection().unwrap(), 0);

    session.undo().unwrap();
    assert_eq!(splat.borrow().deleted_count(), 0);
    assert_eq!(splat.borrow().selection(), vec![true, false]);
}

#[test]
fn test_deleted_points_are_not_reselected() {
    let (mut session, splat) = session_with_pair();
    session.pick_focal_point(Vec3::ZERO).unwrap();
    box_tool(&session).apply(SelectionMode::Set).unwrap();
    session.delete_selection().unwrap();

    box_tool(&session).apply(SelectionMode::Set).unwrap();

    assert_eq!(splat.borrow().selection(), vec![false, false]);
}

#[test]
fn test_delete_without_selected_splat_is_an_error() {
    let mut session = EditorSession::new(EditorConfig::default()).unwrap();

    assert!(session.delete_selection().is_err());
}

#[test]
fn test_selection_functions() {
    let (session, splat) = session_with_pair();
    let events = session.events();

    assert_eq!(
        events.invoke("selection.count", &[]).unwrap(),
        Some(Value::from(0))
    );
    session.pick_focal_point(Vec3::ZERO).unwrap();
    box_tool(&session).apply(SelectionMode::Set).unwrap();

    assert_eq!(
        events.invoke("selection.count", &[]).unwrap(),
        Some(Value::from(1))
    );
    assert_eq!(
        events.invoke("selection", &[]).unwrap(),
        Some(Value::String(splat.borrow().id().to_string()))
    );
    assert_eq!(
        events.invoke("edit.canUndo", &[]).unwrap(),
        Some(Value::Bool(true))
    );
    assert_eq!(
        events.invoke("edit.canRedo", &[]).unwrap(),
        Some(Value::Bool(false))
    );
}
