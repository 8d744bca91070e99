//! Interaction model: selection, hover, and the active gesture.
//!
//! `Gesture` is the state machine driven by the engine's `start_*`,
//! `update_*` and `end_*` calls. Being a single enum, at most one of drag,
//! resize, or rotation can be active at any time. Each active variant carries
//! the context captured at gesture start that later updates are computed from.

#[cfg(test)]
#[path = "interaction_test.rs"]
mod interaction_test;

use serde::Serialize;

use crate::geometry::{Point, Position, ResizeHandle};
use crate::item::ItemId;

/// Context for an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub dragged_item_id: ItemId,
    /// Pointer position at drag start.
    pub start_position: Point,
    /// Most recent pointer position.
    pub current_position: Point,
    /// Pointer minus item origin at drag start; constant for the whole drag.
    pub offset: Point,
}

/// Context for an in-progress resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeState {
    pub resized_item_id: ItemId,
    pub handle: ResizeHandle,
    /// Pointer position at resize start.
    pub start_pointer: Point,
    /// Item position captured verbatim at resize start.
    pub start_bounds: Position,
    /// Bounds after the most recent update.
    pub current_bounds: Position,
}

/// Context for an in-progress rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationState {
    pub rotated_item_id: ItemId,
    /// Item rotation in degrees at rotation start.
    pub start_angle: f64,
    /// Angle after the most recent update.
    pub current_angle: f64,
    /// Pivot the pointer angle is measured around.
    pub center_point: Point,
}

/// The gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
    Rotating(RotationState),
}

impl Gesture {
    /// Id of the item the active gesture is operating on.
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Dragging(s) => Some(s.dragged_item_id),
            Self::Resizing(s) => Some(s.resized_item_id),
            Self::Rotating(s) => Some(s.rotated_item_id),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Coarse interaction mode, derived from the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Idle,
    Drag,
    Resize,
    Rotate,
}

/// Everything about the user's current interaction that is not item geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    /// Selected ids in selection order, without duplicates.
    pub selected_item_ids: Vec<ItemId>,
    pub hovered_item_id: Option<ItemId>,
    pub gesture: Gesture,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self.gesture {
            Gesture::Idle => InteractionMode::Idle,
            Gesture::Dragging(_) => InteractionMode::Drag,
            Gesture::Resizing(_) => InteractionMode::Resize,
            Gesture::Rotating(_) => InteractionMode::Rotate,
        }
    }

    #[must_use]
    pub fn drag_state(&self) -> Option<&DragState> {
        match &self.gesture {
            Gesture::Dragging(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn resize_state(&self) -> Option<&ResizeState> {
        match &self.gesture {
            Gesture::Resizing(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn rotation_state(&self) -> Option<&RotationState> {
        match &self.gesture {
            Gesture::Rotating(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected_item_ids.contains(id)
    }

    /// Replace the selection with `id`, or append it in multi-select mode.
    /// Returns whether the selection changed.
    pub fn select(&mut self, id: ItemId, multi_select: bool) -> bool {
        if multi_select {
            if self.is_selected(&id) {
                return false;
            }
            self.selected_item_ids.push(id);
            return true;
        }
        if self.selected_item_ids == [id] {
            return false;
        }
        self.selected_item_ids.clear();
        self.selected_item_ids.push(id);
        true
    }

    /// Remove `id` from the selection, or clear it entirely when `None`.
    /// Returns whether the selection changed.
    pub fn deselect(&mut self, id: Option<&ItemId>) -> bool {
        let before = self.selected_item_ids.len();
        match id {
            Some(id) => self.selected_item_ids.retain(|s| s != id),
            None => self.selected_item_ids.clear(),
        }
        self.selected_item_ids.len() != before
    }

    /// Drop every reference to `id`: selection, hover, and any gesture on it.
    pub fn forget_item(&mut self, id: &ItemId) {
        self.selected_item_ids.retain(|s| s != id);
        if self.hovered_item_id.as_ref() == Some(id) {
            self.hovered_item_id = None;
        }
        if self.gesture.item_id().as_ref() == Some(id) {
            self.gesture = Gesture::Idle;
        }
    }
}
