//! Engine-wide positioning constraints and the resolver that enforces them.
//!
//! DESIGN
//! ======
//! `apply_constraints` runs on every committed position change, in a fixed
//! order: size bounds, canvas containment, grid snap. Geometric invalidity is
//! never reported as an error; it is corrected here. The resolver is
//! idempotent, and snapping never pushes an item back outside the canvas.

#[cfg(test)]
#[path = "constraints_test.rs"]
mod constraints_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GRID_SIZE, DEFAULT_HISTORY_SIZE, DEFAULT_MIN_ITEM_SIZE,
};
use crate::error::ConfigError;
use crate::geometry::Position;

// =============================================================================
// TYPES
// =============================================================================

/// Canvas extent in canvas units. The origin is always `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Constraints fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositioningConstraints {
    pub canvas: CanvasSize,
    /// Grid spacing; snapping is skipped when this is zero.
    pub grid_size: f64,
    pub snap_to_grid: bool,
    /// Lower bound on item width and height.
    pub min_item_size: f64,
    /// Upper bound on item width and height; unbounded when absent.
    pub max_item_size: Option<f64>,
}

impl Default for PositioningConstraints {
    fn default() -> Self {
        Self {
            canvas: CanvasSize { width: DEFAULT_CANVAS_WIDTH, height: DEFAULT_CANVAS_HEIGHT },
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: false,
            min_item_size: DEFAULT_MIN_ITEM_SIZE,
            max_item_size: None,
        }
    }
}

impl PositioningConstraints {
    /// Parse and validate constraints from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJson` for malformed input, or any error from [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let constraints: Self = serde_json::from_str(json)?;
        constraints.validate()?;
        Ok(constraints)
    }

    /// Check that the constraints describe a usable canvas.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: canvas dimensions and minimum item
    /// size must be positive, grid size non-negative, and the maximum item
    /// size (if set) not below the minimum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let CanvasSize { width, height } = self.canvas;
        if !positive(width) || !positive(height) {
            return Err(ConfigError::InvalidCanvas { width, height });
        }
        if self.grid_size < 0.0 || self.grid_size.is_nan() {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        if !positive(self.min_item_size) {
            return Err(ConfigError::InvalidMinItemSize(self.min_item_size));
        }
        if let Some(max) = self.max_item_size {
            if max < self.min_item_size {
                return Err(ConfigError::InvertedItemSize { min: self.min_item_size, max });
            }
        }
        Ok(())
    }

    fn snaps(&self) -> bool {
        self.snap_to_grid && self.grid_size > 0.0
    }
}

/// Constraints plus engine sizing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub constraints: PositioningConstraints,
    /// Maximum number of actions kept in the undo log.
    pub history_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { constraints: PositioningConstraints::default(), history_size: DEFAULT_HISTORY_SIZE }
    }
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns `ZeroHistorySize` or any constraint validation error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_size == 0 {
            return Err(ConfigError::ZeroHistorySize);
        }
        self.constraints.validate()
    }
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Clamp `position` to the size bounds, the canvas, and the grid.
///
/// Rotation passes through untouched.
#[must_use]
pub fn apply_constraints(position: Position, constraints: &PositioningConstraints) -> Position {
    let canvas = constraints.canvas;

    // (1) size
    let max_width = constraints.max_item_size.map_or(canvas.width, |m| m.min(canvas.width));
    let max_height = constraints.max_item_size.map_or(canvas.height, |m| m.min(canvas.height));
    let width = position.width.max(constraints.min_item_size).min(max_width);
    let height = position.height.max(constraints.min_item_size).min(max_height);

    // (2) canvas
    let max_x = (canvas.width - width).max(0.0);
    let max_y = (canvas.height - height).max(0.0);
    let mut x = position.x.min(max_x).max(0.0);
    let mut y = position.y.min(max_y).max(0.0);

    // (3) grid
    if constraints.snaps() {
        x = snap(x, max_x, constraints.grid_size);
        y = snap(y, max_y, constraints.grid_size);
    }

    Position { x, y, width, height, rotation: position.rotation }
}

fn positive(value: f64) -> bool {
    value > 0.0
}

/// Round to the nearest grid line, falling back to the last line at or below
/// `max` when rounding up would overflow the canvas.
fn snap(value: f64, max: f64, grid: f64) -> f64 {
    let snapped = (value / grid).round() * grid;
    if snapped > max { ((max / grid).floor() * grid).max(0.0) } else { snapped }
}
