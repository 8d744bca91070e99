//! The positioning engine: the public surface the host UI drives.
//!
//! DESIGN
//! ======
//! Every position change funnels through one commit path: constrain the
//! requested position, store it, record a reversible action, then notify
//! listeners. Drag, resize, and rotation updates are all commits, so each
//! update tick is individually undoable. Undo and redo bypass the resolver
//! because recorded states were already constrained when first committed.
//!
//! Fallible interactive operations return `false` instead of erroring; `end_*`
//! calls are silent no-ops when nothing is active.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::constraints::{EngineConfig, PositioningConstraints, apply_constraints};
use crate::error::{EngineError, ItemError};
use crate::events::{Dispatcher, Event, EventKind, ListenerId, RestoreDirection};
use crate::geometry::{Point, Position, ResizeHandle, resize_bounds, rotation_angle};
use crate::history::{ActionKind, History, PositioningAction};
use crate::interaction::{DragState, Gesture, InteractionState, ResizeState, RotationState};
use crate::item::{ItemId, ItemStore, PositionableItem};

/// Owns the items, interaction state, undo log and listeners.
#[derive(Debug)]
pub struct PositioningEngine {
    store: ItemStore,
    constraints: PositioningConstraints,
    history: History,
    interaction: InteractionState,
    dispatcher: Dispatcher,
}

impl PositioningEngine {
    /// Create an engine over `items` with the default history size.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the constraints are invalid, or `Item` for a
    /// duplicate id or a non-positive item size.
    pub fn new(items: Vec<PositionableItem>, constraints: PositioningConstraints) -> Result<Self, EngineError> {
        Self::with_config(items, EngineConfig { constraints, ..EngineConfig::default() })
    }

    /// Create an engine from a full configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::new`]; additionally rejects a zero history size.
    pub fn with_config(items: Vec<PositionableItem>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let store = ItemStore::from_items(items)?;
        debug!(items = store.len(), history_size = config.history_size, "positioning engine created");
        Ok(Self {
            store,
            constraints: config.constraints,
            history: History::new(config.history_size),
            interaction: InteractionState::default(),
            dispatcher: Dispatcher::new(),
        })
    }

    // --- Queries ---

    /// All items in store order.
    #[must_use]
    pub fn items(&self) -> &[PositionableItem] {
        self.store.items()
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&PositionableItem> {
        self.store.get(id)
    }

    /// Selected items in selection order.
    #[must_use]
    pub fn selected_items(&self) -> Vec<&PositionableItem> {
        self.interaction.selected_item_ids.iter().filter_map(|id| self.store.get(id)).collect()
    }

    #[must_use]
    pub fn interaction_state(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn constraints(&self) -> &PositioningConstraints {
        &self.constraints
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Eventing ---

    /// Subscribe to one kind of event.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&Event) + 'static,
    {
        let id = self.dispatcher.on(kind, listener);
        debug!(%kind, listeners = self.dispatcher.listener_count(kind), "listener registered");
        id
    }

    /// Unsubscribe. Returns false if the listener was not registered for `kind`.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let removed = self.dispatcher.off(kind, id);
        debug!(%kind, removed, listeners = self.dispatcher.listener_count(kind), "listener unregistered");
        removed
    }

    // --- Item lifecycle ---

    /// Add an item at the end of store order. The item is stored as given.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` or `InvalidSize`.
    pub fn add_item(&mut self, item: PositionableItem) -> Result<ItemId, ItemError> {
        let id = self.store.insert(item)?;
        debug!(item_id = %id, "item added");
        Ok(id)
    }

    /// Remove an item and every reference to it: selection, hover, an active
    /// gesture on it, and its history entries.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        if self.store.remove(id).is_none() {
            debug!(item_id = %id, "remove_item: unknown item");
            return false;
        }
        let was_selected = self.interaction.is_selected(id);
        self.interaction.forget_item(id);
        let pruned = self.history.forget_item(id);
        debug!(item_id = %id, pruned, "item removed");
        if was_selected {
            self.emit_selection();
        }
        true
    }

    // --- Position updates ---

    /// Move/resize an item to `position`, after constraints. Records a move.
    pub fn update_item_position(&mut self, id: &ItemId, position: Position) -> bool {
        self.commit(id, position, ActionKind::Move).is_some()
    }

    /// Restore one item (or every item, in store order) to its default
    /// position through the normal, undoable update path.
    pub fn reset_to_defaults(&mut self, id: Option<&ItemId>) -> bool {
        match id {
            Some(id) => {
                let Some(default) = self.store.get(id).map(|item| item.default_position) else {
                    debug!(item_id = %id, "reset_to_defaults: unknown item");
                    return false;
                };
                self.commit(id, default, ActionKind::Move).is_some()
            }
            None => {
                for id in self.store.ids() {
                    if let Some(default) = self.store.get(&id).map(|item| item.default_position) {
                        self.commit(&id, default, ActionKind::Move);
                    }
                }
                true
            }
        }
    }

    // --- Drag ---

    /// Begin dragging `id` from pointer `start_pos`. Forces single selection.
    pub fn start_drag(&mut self, id: &ItemId, start_pos: Point) -> bool {
        if !self.ensure_idle("start_drag") {
            return false;
        }
        let Some(position) = self.store.position(id) else {
            debug!(item_id = %id, "start_drag: unknown item");
            return false;
        };
        let offset = start_pos.offset_from(position.top_left());
        self.interaction.gesture = Gesture::Dragging(DragState {
            dragged_item_id: *id,
            start_position: start_pos,
            current_position: start_pos,
            offset,
        });
        debug!(item_id = %id, offset_x = offset.x, offset_y = offset.y, "drag started");

        if self.interaction.select(*id, false) {
            self.emit_selection();
        }
        self.dispatcher.emit(&Event::DragStart { item_id: *id, start_pos, position });
        true
    }

    /// Move the dragged item so the pointer keeps its starting offset.
    pub fn update_drag(&mut self, current_pos: Point) -> bool {
        let Gesture::Dragging(mut state) = self.interaction.gesture else {
            return false;
        };
        let Some(position) = self.store.position(&state.dragged_item_id) else {
            return false;
        };
        state.current_position = current_pos;
        self.interaction.gesture = Gesture::Dragging(state);

        let origin = current_pos.offset_from(state.offset);
        self.commit(&state.dragged_item_id, position.moved_to(origin), ActionKind::Move).is_some()
    }

    pub fn end_drag(&mut self) {
        let Gesture::Dragging(state) = self.interaction.gesture else {
            return;
        };
        self.interaction.gesture = Gesture::Idle;
        let id = state.dragged_item_id;
        debug!(item_id = %id, "drag ended");
        if let Some(position) = self.store.position(&id) {
            self.dispatcher.emit(&Event::DragEnd { item_id: id, position });
        }
    }

    // --- Resize ---

    /// Begin resizing `id` from `handle`; the current position becomes the
    /// fixed reference for every update of this gesture.
    pub fn start_resize(&mut self, id: &ItemId, handle: ResizeHandle, start_pos: Point) -> bool {
        if !self.ensure_idle("start_resize") {
            return false;
        }
        let Some(start_bounds) = self.store.position(id) else {
            debug!(item_id = %id, "start_resize: unknown item");
            return false;
        };
        self.interaction.gesture = Gesture::Resizing(ResizeState {
            resized_item_id: *id,
            handle,
            start_pointer: start_pos,
            start_bounds,
            current_bounds: start_bounds,
        });
        debug!(item_id = %id, ?handle, "resize started");
        self.dispatcher.emit(&Event::ResizeStart { item_id: *id, handle, start_bounds });
        true
    }

    /// Resize toward `current_pos` from the bounds captured at resize start.
    pub fn update_resize(&mut self, current_pos: Point) -> bool {
        let Gesture::Resizing(mut state) = self.interaction.gesture else {
            return false;
        };
        let Some(limits) = self.store.get(&state.resized_item_id).map(PositionableItem::resize_limits) else {
            return false;
        };
        let bounds = resize_bounds(state.start_bounds, state.handle, current_pos, limits);
        let Some(committed) = self.commit(&state.resized_item_id, bounds, ActionKind::Resize) else {
            return false;
        };
        state.current_bounds = committed;
        self.interaction.gesture = Gesture::Resizing(state);
        true
    }

    pub fn end_resize(&mut self) {
        let Gesture::Resizing(state) = self.interaction.gesture else {
            return;
        };
        self.interaction.gesture = Gesture::Idle;
        let id = state.resized_item_id;
        debug!(item_id = %id, handle = ?state.handle, "resize ended");
        if let Some(bounds) = self.store.position(&id) {
            self.dispatcher.emit(&Event::ResizeEnd { item_id: id, handle: state.handle, bounds });
        }
    }

    // --- Rotation ---

    /// Begin rotating `id` around `center_point`.
    pub fn start_rotation(&mut self, id: &ItemId, center_point: Point) -> bool {
        if !self.ensure_idle("start_rotation") {
            return false;
        }
        let Some(position) = self.store.position(id) else {
            debug!(item_id = %id, "start_rotation: unknown item");
            return false;
        };
        let start_angle = position.rotation;
        self.interaction.gesture = Gesture::Rotating(RotationState {
            rotated_item_id: *id,
            start_angle,
            current_angle: start_angle,
            center_point,
        });
        debug!(item_id = %id, start_angle, "rotation started");
        self.dispatcher.emit(&Event::RotationStart { item_id: *id, center: center_point, start_angle });
        true
    }

    /// Point the item along the ray from the rotation center to `current_pos`.
    pub fn update_rotation(&mut self, current_pos: Point) -> bool {
        let Gesture::Rotating(mut state) = self.interaction.gesture else {
            return false;
        };
        let Some(position) = self.store.position(&state.rotated_item_id) else {
            return false;
        };
        let angle = rotation_angle(state.center_point, current_pos);
        let Some(committed) = self.commit(&state.rotated_item_id, position.with_rotation(angle), ActionKind::Rotate)
        else {
            return false;
        };
        state.current_angle = committed.rotation;
        self.interaction.gesture = Gesture::Rotating(state);
        true
    }

    pub fn end_rotation(&mut self) {
        let Gesture::Rotating(state) = self.interaction.gesture else {
            return;
        };
        self.interaction.gesture = Gesture::Idle;
        let id = state.rotated_item_id;
        debug!(item_id = %id, angle = state.current_angle, "rotation ended");
        if let Some(position) = self.store.position(&id) {
            self.dispatcher.emit(&Event::RotationEnd { item_id: id, angle: position.rotation });
        }
    }

    // --- Selection / hover ---

    /// Select `id`, replacing the selection or (with `multi_select`) adding
    /// to it. Returns false for an unknown item.
    pub fn select_item(&mut self, id: &ItemId, multi_select: bool) -> bool {
        if !self.store.contains(id) {
            debug!(item_id = %id, "select_item: unknown item");
            return false;
        }
        self.interaction.select(*id, multi_select);
        self.emit_selection();
        true
    }

    /// Deselect one item, or everything when `id` is `None`.
    pub fn deselect_item(&mut self, id: Option<&ItemId>) {
        self.interaction.deselect(id);
        self.emit_selection();
    }

    /// Set or clear the hovered item. Returns false for an unknown item.
    pub fn set_hovered(&mut self, id: Option<&ItemId>) -> bool {
        if let Some(id) = id {
            if !self.store.contains(id) {
                return false;
            }
        }
        self.interaction.hovered_item_id = id.copied();
        true
    }

    // --- History ---

    /// Revert the most recent applied action. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(action) = self.history.step_back().cloned() else {
            return false;
        };
        self.restore(&action, action.previous_position, RestoreDirection::Undo);
        true
    }

    /// Reapply the next undone action. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        let Some(action) = self.history.step_forward().cloned() else {
            return false;
        };
        self.restore(&action, action.new_position, RestoreDirection::Redo);
        true
    }

    /// Drop all recorded actions.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // --- Internals ---

    /// Constrain, store, record, and announce a position change.
    fn commit(&mut self, id: &ItemId, requested: Position, kind: ActionKind) -> Option<Position> {
        let Some(previous) = self.store.position(id) else {
            debug!(item_id = %id, ?kind, "position update: unknown item");
            return None;
        };
        let position = apply_constraints(requested, &self.constraints);
        self.store.set_position(id, position);
        self.history.record(PositioningAction::new(kind, *id, previous, position));
        debug!(
            item_id = %id,
            ?kind,
            x = position.x,
            y = position.y,
            width = position.width,
            height = position.height,
            rotation = position.rotation,
            "position committed"
        );
        self.dispatcher.emit(&Event::ItemPositionChanged { item_id: *id, position });
        Some(position)
    }

    fn restore(&mut self, action: &PositioningAction, position: Position, direction: RestoreDirection) {
        let id = action.item_id;
        self.store.set_position(&id, position);
        debug!(item_id = %id, kind = ?action.kind, ?direction, "item restored");
        self.dispatcher.emit(&Event::ItemRestored { item_id: id, position, kind: action.kind, direction });
    }

    fn emit_selection(&mut self) {
        let selected_item_ids = self.interaction.selected_item_ids.clone();
        self.dispatcher.emit(&Event::SelectionChanged { selected_item_ids });
    }

    fn ensure_idle(&self, op: &'static str) -> bool {
        if self.interaction.gesture.is_idle() {
            return true;
        }
        debug!(op, mode = ?self.interaction.mode(), "rejected: another gesture is active");
        false
    }
}
