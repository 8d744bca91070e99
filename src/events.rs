//! Typed change notifications and the synchronous dispatcher that delivers them.
//!
//! Every state change the engine makes is announced as an [`Event`]. Listeners
//! subscribe per [`EventKind`] and run synchronously, in registration order,
//! before the mutating call returns. A panicking listener is not isolated: the
//! panic unwinds through the engine call that emitted the event.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::geometry::{Point, Position, ResizeHandle};
use crate::history::ActionKind;
use crate::item::ItemId;

/// Name of an event, used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    ItemPositionChanged,
    DragStart,
    DragEnd,
    ResizeStart,
    ResizeEnd,
    RotationStart,
    RotationEnd,
    SelectionChanged,
    ItemRestored,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        Self::ItemPositionChanged,
        Self::DragStart,
        Self::DragEnd,
        Self::ResizeStart,
        Self::ResizeEnd,
        Self::RotationStart,
        Self::RotationEnd,
        Self::SelectionChanged,
        Self::ItemRestored,
    ];

    /// Wire name of the event.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ItemPositionChanged => "itemPositionChanged",
            Self::DragStart => "dragStart",
            Self::DragEnd => "dragEnd",
            Self::ResizeStart => "resizeStart",
            Self::ResizeEnd => "resizeEnd",
            Self::RotationStart => "rotationStart",
            Self::RotationEnd => "rotationEnd",
            Self::SelectionChanged => "selectionChanged",
            Self::ItemRestored => "itemRestored",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which history direction restored an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestoreDirection {
    Undo,
    Redo,
}

/// A state change announced to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Event {
    /// A committed, constrained position change.
    ItemPositionChanged { item_id: ItemId, position: Position },
    DragStart { item_id: ItemId, start_pos: Point, position: Position },
    DragEnd { item_id: ItemId, position: Position },
    ResizeStart { item_id: ItemId, handle: ResizeHandle, start_bounds: Position },
    ResizeEnd { item_id: ItemId, handle: ResizeHandle, bounds: Position },
    RotationStart { item_id: ItemId, center: Point, start_angle: f64 },
    RotationEnd { item_id: ItemId, angle: f64 },
    SelectionChanged { selected_item_ids: Vec<ItemId> },
    /// An item was put back to a recorded state by undo or redo.
    ItemRestored { item_id: ItemId, position: Position, kind: ActionKind, direction: RestoreDirection },
}

impl Event {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ItemPositionChanged { .. } => EventKind::ItemPositionChanged,
            Self::DragStart { .. } => EventKind::DragStart,
            Self::DragEnd { .. } => EventKind::DragEnd,
            Self::ResizeStart { .. } => EventKind::ResizeStart,
            Self::ResizeEnd { .. } => EventKind::ResizeEnd,
            Self::RotationStart { .. } => EventKind::RotationStart,
            Self::RotationEnd { .. } => EventKind::RotationEnd,
            Self::SelectionChanged { .. } => EventKind::SelectionChanged,
            Self::ItemRestored { .. } => EventKind::ItemRestored,
        }
    }
}

/// Handle returned by [`Dispatcher::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Event)>;

/// Synchronous publish/subscribe keyed by [`EventKind`].
#[derive(Default)]
pub struct Dispatcher {
    listeners: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `kind`. Listeners run in registration order.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&Event) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(kind).or_default().push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns false if it was not registered for `kind`.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(lid, _)| *lid != id);
        list.len() != before
    }

    /// Deliver `event` to every listener registered for its kind.
    pub fn emit(&mut self, event: &Event) {
        if let Some(list) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in list.iter_mut() {
                listener(event);
            }
        }
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<EventKind, usize> = self.listeners.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("Dispatcher").field("listeners", &counts).field("next_id", &self.next_id).finish()
    }
}
