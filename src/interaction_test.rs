#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn drag(id: ItemId) -> Gesture {
    Gesture::Dragging(DragState {
        dragged_item_id: id,
        start_position: Point::new(50.0, 50.0),
        current_position: Point::new(50.0, 50.0),
        offset: Point::new(40.0, 40.0),
    })
}

fn resize(id: ItemId) -> Gesture {
    let bounds = Position::new(0.0, 0.0, 100.0, 100.0);
    Gesture::Resizing(ResizeState {
        resized_item_id: id,
        handle: ResizeHandle::Se,
        start_pointer: Point::new(100.0, 100.0),
        start_bounds: bounds,
        current_bounds: bounds,
    })
}

fn rotate(id: ItemId) -> Gesture {
    Gesture::Rotating(RotationState {
        rotated_item_id: id,
        start_angle: 0.0,
        current_angle: 0.0,
        center_point: Point::new(50.0, 50.0),
    })
}

// =============================================================
// Gesture / mode
// =============================================================

#[test]
fn default_state_is_idle() {
    let s = InteractionState::default();
    assert_eq!(s.mode(), InteractionMode::Idle);
    assert!(s.gesture.is_idle());
    assert!(s.selected_item_ids.is_empty());
    assert!(s.hovered_item_id.is_none());
}

#[test]
fn mode_tracks_gesture() {
    let id = Uuid::new_v4();
    let mut s = InteractionState { gesture: drag(id), ..Default::default() };
    assert_eq!(s.mode(), InteractionMode::Drag);
    assert!(s.drag_state().is_some());
    assert!(s.resize_state().is_none());

    s.gesture = resize(id);
    assert_eq!(s.mode(), InteractionMode::Resize);
    assert!(s.resize_state().is_some());
    assert!(s.drag_state().is_none());

    s.gesture = rotate(id);
    assert_eq!(s.mode(), InteractionMode::Rotate);
    assert!(s.rotation_state().is_some());
    assert!(s.resize_state().is_none());
}

#[test]
fn gesture_item_id() {
    let id = Uuid::new_v4();
    assert_eq!(Gesture::Idle.item_id(), None);
    assert_eq!(drag(id).item_id(), Some(id));
    assert_eq!(resize(id).item_id(), Some(id));
    assert_eq!(rotate(id).item_id(), Some(id));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn single_select_replaces_selection() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut s = InteractionState::default();
    assert!(s.select(a, false));
    assert!(s.select(b, false));
    assert_eq!(s.selected_item_ids, vec![b]);
}

#[test]
fn single_select_same_item_reports_no_change() {
    let a = Uuid::new_v4();
    let mut s = InteractionState::default();
    s.select(a, false);
    assert!(!s.select(a, false));
}

#[test]
fn multi_select_appends_without_duplicates() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut s = InteractionState::default();
    for _ in 0..3 {
        s.select(a, true);
        s.select(b, true);
    }
    assert_eq!(s.selected_item_ids, vec![a, b]);
}

#[test]
fn deselect_one_and_all() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut s = InteractionState::default();
    s.select(a, true);
    s.select(b, true);
    assert!(s.deselect(Some(&a)));
    assert_eq!(s.selected_item_ids, vec![b]);
    assert!(!s.deselect(Some(&a)));
    assert!(s.deselect(None));
    assert!(s.selected_item_ids.is_empty());
    assert!(!s.deselect(None));
}

// =============================================================
// forget_item
// =============================================================

#[test]
fn forget_item_clears_all_references() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut s = InteractionState { gesture: drag(a), hovered_item_id: Some(a), ..Default::default() };
    s.select(a, true);
    s.select(b, true);

    s.forget_item(&a);
    assert_eq!(s.selected_item_ids, vec![b]);
    assert!(s.hovered_item_id.is_none());
    assert!(s.gesture.is_idle());
}

#[test]
fn forget_item_keeps_gesture_on_other_item() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut s = InteractionState { gesture: rotate(b), ..Default::default() };
    s.forget_item(&a);
    assert_eq!(s.mode(), InteractionMode::Rotate);
}
