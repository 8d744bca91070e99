//! Scripted scenes: a starting layout plus a list of engine calls.
//!
//! DESIGN
//! ======
//! A scene is the JSON form of a host session. `steps` are replayed in order
//! against a fresh engine and every emitted event is captured, so a scene file
//! doubles as a reproducible trace of the engine's behavior. A step the engine
//! rejects (unknown item, gesture already active) is recorded, not fatal.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::DEFAULT_HISTORY_SIZE;
use crate::constraints::{EngineConfig, PositioningConstraints};
use crate::engine::PositioningEngine;
use crate::error::EngineError;
use crate::events::{Event, EventKind};
use crate::geometry::{Point, Position, ResizeHandle};
use crate::item::{ItemId, PositionableItem};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One engine call. Tagged by `op`, named after the engine method it invokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    UpdateItemPosition {
        item_id: ItemId,
        position: Position,
    },
    ResetToDefaults {
        #[serde(default)]
        item_id: Option<ItemId>,
    },
    StartDrag {
        item_id: ItemId,
        point: Point,
    },
    UpdateDrag {
        point: Point,
    },
    EndDrag,
    StartResize {
        item_id: ItemId,
        handle: ResizeHandle,
        point: Point,
    },
    UpdateResize {
        point: Point,
    },
    EndResize,
    StartRotation {
        item_id: ItemId,
        center: Point,
    },
    UpdateRotation {
        point: Point,
    },
    EndRotation,
    Select {
        item_id: ItemId,
        #[serde(default)]
        multi_select: bool,
    },
    Deselect {
        #[serde(default)]
        item_id: Option<ItemId>,
    },
    Hover {
        #[serde(default)]
        item_id: Option<ItemId>,
    },
    Undo,
    Redo,
    ClearHistory,
    AddItem {
        item: PositionableItem,
    },
    RemoveItem {
        item_id: ItemId,
    },
}

impl Step {
    /// Run this step. Returns false when the engine rejected it.
    pub fn apply(&self, engine: &mut PositioningEngine) -> bool {
        match self {
            Self::UpdateItemPosition { item_id, position } => engine.update_item_position(item_id, *position),
            Self::ResetToDefaults { item_id } => engine.reset_to_defaults(item_id.as_ref()),
            Self::StartDrag { item_id, point } => engine.start_drag(item_id, *point),
            Self::UpdateDrag { point } => engine.update_drag(*point),
            Self::EndDrag => {
                engine.end_drag();
                true
            }
            Self::StartResize { item_id, handle, point } => engine.start_resize(item_id, *handle, *point),
            Self::UpdateResize { point } => engine.update_resize(*point),
            Self::EndResize => {
                engine.end_resize();
                true
            }
            Self::StartRotation { item_id, center } => engine.start_rotation(item_id, *center),
            Self::UpdateRotation { point } => engine.update_rotation(*point),
            Self::EndRotation => {
                engine.end_rotation();
                true
            }
            Self::Select { item_id, multi_select } => engine.select_item(item_id, *multi_select),
            Self::Deselect { item_id } => {
                engine.deselect_item(item_id.as_ref());
                true
            }
            Self::Hover { item_id } => engine.set_hovered(item_id.as_ref()),
            Self::Undo => engine.undo(),
            Self::Redo => engine.redo(),
            Self::ClearHistory => {
                engine.clear_history();
                true
            }
            Self::AddItem { item } => match engine.add_item(item.clone()) {
                Ok(_) => true,
                Err(e) => {
                    debug!(error = %e, "add_item step rejected");
                    false
                }
            },
            Self::RemoveItem { item_id } => engine.remove_item(item_id),
        }
    }
}

/// Starting layout and the steps to replay against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub constraints: PositioningConstraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_size: Option<usize>,
    pub items: Vec<PositionableItem>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// What a replay produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    /// Every event, in emission order.
    pub events: Vec<Event>,
    /// Indices of steps the engine rejected.
    pub rejected_steps: Vec<usize>,
    /// Final items, in store order.
    pub items: Vec<PositionableItem>,
}

impl Scene {
    /// Parse a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJson` if the document does not describe a scene.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or `InvalidJson`.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let json = fs::read_to_string(path)
            .map_err(|source| SceneError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&json)
    }

    /// Engine configuration for this scene. `history_size` overrides the
    /// scene's own value when given.
    #[must_use]
    pub fn config(&self, history_size: Option<usize>) -> EngineConfig {
        EngineConfig {
            constraints: self.constraints,
            history_size: history_size.or(self.history_size).unwrap_or(DEFAULT_HISTORY_SIZE),
        }
    }

    /// Build an engine from the scene and run every step.
    ///
    /// # Errors
    ///
    /// Returns `Engine` if the constraints or the initial items are invalid.
    pub fn replay(self, history_size: Option<usize>) -> Result<Replay, SceneError> {
        let config = self.config(history_size);
        let mut engine = PositioningEngine::with_config(self.items, config)?;

        let sink = Rc::new(RefCell::new(Vec::new()));
        for kind in EventKind::ALL {
            let sink = Rc::clone(&sink);
            engine.on(kind, move |event| sink.borrow_mut().push(event.clone()));
        }

        let mut rejected_steps = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            if !step.apply(&mut engine) {
                debug!(index, ?step, "step rejected");
                rejected_steps.push(index);
            }
        }

        let items = engine.items().to_vec();
        let events = sink.take();
        info!(steps = self.steps.len(), events = events.len(), rejected = rejected_steps.len(), "scene replayed");
        Ok(Replay { events, rejected_steps, items })
    }
}
