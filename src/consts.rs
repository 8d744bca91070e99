//! Shared numeric defaults for the positioning engine.

// ── Items ───────────────────────────────────────────────────────

/// Minimum width and height applied during resize when an item sets no
/// constraints of its own.
pub const DEFAULT_MIN_DIMENSION: f64 = 50.0;

// ── History ─────────────────────────────────────────────────────

/// Number of actions the undo log keeps before evicting the oldest.
pub const DEFAULT_HISTORY_SIZE: usize = 50;

// ── Engine constraints ──────────────────────────────────────────

/// Default canvas width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1000.0;

/// Default canvas height in canvas units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Default grid spacing used when snapping is enabled.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Default engine-wide lower bound on item width and height.
pub const DEFAULT_MIN_ITEM_SIZE: f64 = 20.0;
