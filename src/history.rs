//! Bounded undo/redo log of positioning actions.
//!
//! DESIGN
//! ======
//! The log is append-only with a cursor. Recording after an undo discards the
//! undone future. Once the log exceeds its capacity the oldest entry is
//! evicted and the cursor shifts with it. The log itself never touches the
//! item store; the engine applies the states it hands back.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_HISTORY_SIZE;
use crate::geometry::Position;
use crate::item::ItemId;

/// What kind of gesture produced an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Move,
    Resize,
    Rotate,
}

/// One reversible position change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositioningAction {
    pub kind: ActionKind,
    pub item_id: ItemId,
    /// Position before the change; restored by undo.
    pub previous_position: Position,
    /// Position after the change; restored by redo.
    pub new_position: Position,
    /// Milliseconds since the Unix epoch when the action was recorded.
    pub timestamp: i64,
}

impl PositioningAction {
    /// Build an action stamped with the current wall-clock time.
    #[must_use]
    pub fn new(kind: ActionKind, item_id: ItemId, previous_position: Position, new_position: Position) -> Self {
        Self { kind, item_id, previous_position, new_position, timestamp: now_ms() }
    }
}

/// Undo/redo log with a movable cursor.
#[derive(Debug, Clone)]
pub struct History {
    actions: Vec<PositioningAction>,
    /// Number of actions currently applied; `actions[applied - 1]` is the
    /// next one to undo.
    applied: usize,
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl History {
    /// Create an empty log holding at most `max_size` actions (minimum 1).
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self { actions: Vec::new(), applied: 0, max_size: max_size.max(1) }
    }

    /// Append an action, discarding any undone future and evicting the oldest
    /// entry when over capacity.
    pub fn record(&mut self, action: PositioningAction) {
        self.actions.truncate(self.applied);
        self.actions.push(action);
        self.applied = self.actions.len();

        if self.actions.len() > self.max_size {
            self.actions.remove(0);
            self.applied -= 1;
        }
    }

    /// Step the cursor back, returning the action to revert.
    pub fn step_back(&mut self) -> Option<&PositioningAction> {
        if self.applied == 0 {
            return None;
        }
        self.applied -= 1;
        self.actions.get(self.applied)
    }

    /// Step the cursor forward, returning the action to reapply.
    pub fn step_forward(&mut self) -> Option<&PositioningAction> {
        if self.applied >= self.actions.len() {
            return None;
        }
        self.applied += 1;
        self.actions.get(self.applied - 1)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.applied < self.actions.len()
    }

    /// Index of the most recently applied action, or `None` when everything
    /// has been undone.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    /// All recorded actions, oldest first.
    #[must_use]
    pub fn actions(&self) -> &[PositioningAction] {
        &self.actions
    }

    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Drop every action.
    pub fn clear(&mut self) {
        self.actions.clear();
        self.applied = 0;
    }

    /// Drop every action that touches `item_id`, keeping the cursor on the
    /// same surviving action. Returns how many actions were removed.
    pub fn forget_item(&mut self, item_id: &ItemId) -> usize {
        let before_cursor = self.actions[..self.applied].iter().filter(|a| a.item_id == *item_id).count();
        let before = self.actions.len();
        self.actions.retain(|a| a.item_id != *item_id);
        self.applied -= before_cursor;
        before - self.actions.len()
    }
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
