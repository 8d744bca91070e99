use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use super::*;

fn selection(ids: Vec<ItemId>) -> Event {
    Event::SelectionChanged { selected_item_ids: ids }
}

fn recorder(dispatcher: &mut Dispatcher, kind: EventKind) -> (ListenerId, Rc<RefCell<Vec<Event>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = dispatcher.on(kind, move |e| sink.borrow_mut().push(e.clone()));
    (id, seen)
}

// =============================================================
// EventKind
// =============================================================

#[test]
fn event_kind_names() {
    assert_eq!(EventKind::ItemPositionChanged.as_str(), "itemPositionChanged");
    assert_eq!(EventKind::RotationEnd.to_string(), "rotationEnd");
    assert_eq!(serde_json::to_string(&EventKind::ItemRestored).unwrap(), "\"itemRestored\"");
}

#[test]
fn all_kinds_are_distinct() {
    let names: std::collections::HashSet<&str> = EventKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(names.len(), EventKind::ALL.len());
}

#[test]
fn event_maps_to_its_kind() {
    let id = Uuid::new_v4();
    let p = Position::new(0.0, 0.0, 1.0, 1.0);
    assert_eq!(Event::DragEnd { item_id: id, position: p }.kind(), EventKind::DragEnd);
    assert_eq!(selection(vec![]).kind(), EventKind::SelectionChanged);
    assert_eq!(Event::RotationEnd { item_id: id, angle: 0.0 }.kind(), EventKind::RotationEnd);
}

#[test]
fn event_serializes_tagged_camel_case() {
    let id = Uuid::nil();
    let e = Event::ItemPositionChanged { item_id: id, position: Position::new(1.0, 2.0, 3.0, 4.0) };
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["event"], "itemPositionChanged");
    assert_eq!(v["itemId"], id.to_string());
    assert_eq!(v["position"]["width"], 3.0);
}

// =============================================================
// Dispatcher
// =============================================================

#[test]
fn emit_reaches_listeners_of_that_kind_only() {
    let mut d = Dispatcher::new();
    let (_, selections) = recorder(&mut d, EventKind::SelectionChanged);
    let (_, drags) = recorder(&mut d, EventKind::DragEnd);

    d.emit(&selection(vec![Uuid::new_v4()]));
    assert_eq!(selections.borrow().len(), 1);
    assert!(drags.borrow().is_empty());
}

#[test]
fn listeners_run_in_registration_order() {
    let mut d = Dispatcher::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for n in 0..3 {
        let sink = Rc::clone(&order);
        d.on(EventKind::SelectionChanged, move |_| sink.borrow_mut().push(n));
    }
    d.emit(&selection(vec![]));
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
}

#[test]
fn off_removes_only_that_listener() {
    let mut d = Dispatcher::new();
    let (first, first_seen) = recorder(&mut d, EventKind::SelectionChanged);
    let (_, second_seen) = recorder(&mut d, EventKind::SelectionChanged);

    assert!(d.off(EventKind::SelectionChanged, first));
    d.emit(&selection(vec![]));
    assert!(first_seen.borrow().is_empty());
    assert_eq!(second_seen.borrow().len(), 1);
    assert_eq!(d.listener_count(EventKind::SelectionChanged), 1);
}

#[test]
fn off_unknown_listener_returns_false() {
    let mut d = Dispatcher::new();
    let (id, _) = recorder(&mut d, EventKind::DragStart);
    assert!(!d.off(EventKind::DragEnd, id));
    assert!(d.off(EventKind::DragStart, id));
    assert!(!d.off(EventKind::DragStart, id));
}

#[test]
fn emit_without_listeners_is_noop() {
    let mut d = Dispatcher::new();
    d.emit(&selection(vec![]));
    assert_eq!(d.listener_count(EventKind::SelectionChanged), 0);
}

#[test]
#[should_panic(expected = "listener failed")]
fn panicking_listener_propagates_to_emitter() {
    let mut d = Dispatcher::new();
    d.on(EventKind::SelectionChanged, |_| panic!("listener failed"));
    d.emit(&selection(vec![]));
}

#[test]
fn debug_shows_listener_counts() {
    let mut d = Dispatcher::new();
    recorder(&mut d, EventKind::DragStart);
    let s = format!("{d:?}");
    assert!(s.contains("Dispatcher"));
    assert!(s.contains("DragStart"));
}
