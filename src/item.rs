//! Item model: positionable items, their per-item constraints, and the store.
//!
//! The store is an arena addressed by [`ItemId`]. Callers never hold
//! references into it across calls; every operation names items by id. Store
//! order is insertion order and is what [`ItemStore::items`] and bulk resets
//! iterate in.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_MIN_DIMENSION;
use crate::error::ItemError;
use crate::geometry::{Position, ResizeLimits};

/// Unique identifier for a positionable item.
pub type ItemId = Uuid;

/// Per-item limits used by the resize controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConstraints {
    pub min_width: f64,
    pub min_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    /// Keep the width/height ratio from the start of each resize.
    #[serde(default)]
    pub maintain_aspect_ratio: bool,
}

impl Default for ItemConstraints {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_DIMENSION,
            min_height: DEFAULT_MIN_DIMENSION,
            max_width: None,
            max_height: None,
            maintain_aspect_ratio: false,
        }
    }
}

impl From<ItemConstraints> for ResizeLimits {
    fn from(c: ItemConstraints) -> Self {
        Self {
            min_width: c.min_width,
            min_height: c.min_height,
            max_width: c.max_width,
            max_height: c.max_height,
            maintain_aspect_ratio: c.maintain_aspect_ratio,
        }
    }
}

/// An item the engine can move, resize, and rotate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionableItem {
    pub id: ItemId,
    /// Current position; the only field the engine mutates.
    pub position: Position,
    /// Position restored by `reset_to_defaults`.
    pub default_position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ItemConstraints>,
    /// Host-owned payload (text content, image source, ...). Never read by the engine.
    #[serde(default)]
    pub props: serde_json::Value,
}

impl PositionableItem {
    /// New item whose default position is its starting position.
    #[must_use]
    pub fn new(id: ItemId, position: Position) -> Self {
        Self { id, position, default_position: position, constraints: None, props: serde_json::Value::Null }
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: ItemConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    #[must_use]
    pub fn with_default_position(mut self, default_position: Position) -> Self {
        self.default_position = default_position;
        self
    }

    /// Resize limits for this item, falling back to the default minimum.
    #[must_use]
    pub fn resize_limits(&self) -> ResizeLimits {
        self.constraints.unwrap_or_default().into()
    }
}

/// In-memory, id-indexed store of positionable items.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<PositionableItem>,
    index: HashMap<ItemId, usize>,
}

impl ItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an initial list, preserving its order.
    ///
    /// # Errors
    ///
    /// Returns the first insertion error (duplicate id or non-positive size).
    pub fn from_items(items: Vec<PositionableItem>) -> Result<Self, ItemError> {
        let mut store = Self::new();
        for item in items {
            store.insert(item)?;
        }
        Ok(store)
    }

    /// Append an item at the end of store order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the id is taken, or `InvalidSize` if either
    /// dimension of the current position is not positive.
    pub fn insert(&mut self, item: PositionableItem) -> Result<ItemId, ItemError> {
        let id = item.id;
        if self.index.contains_key(&id) {
            return Err(ItemError::DuplicateId(id));
        }
        let Position { width, height, .. } = item.position;
        if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
            return Err(ItemError::InvalidSize { id, width, height });
        }
        self.index.insert(id, self.items.len());
        self.items.push(item);
        Ok(id)
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<PositionableItem> {
        let idx = self.index.remove(id)?;
        let item = self.items.remove(idx);
        for moved in &self.items[idx..] {
            if let Some(slot) = self.index.get_mut(&moved.id) {
                *slot -= 1;
            }
        }
        Some(item)
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&PositionableItem> {
        self.index.get(id).map(|&idx| &self.items[idx])
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// Current position of an item.
    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<Position> {
        self.get(id).map(|item| item.position)
    }

    /// Overwrite an item's position. Returns false if the item doesn't exist.
    pub fn set_position(&mut self, id: &ItemId, position: Position) -> bool {
        let Some(&idx) = self.index.get(id) else {
            return false;
        };
        self.items[idx].position = position;
        true
    }

    /// All items in store order.
    #[must_use]
    pub fn items(&self) -> &[PositionableItem] {
        &self.items
    }

    /// All ids in store order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Number of items currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
