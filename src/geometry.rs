//! Geometry primitives and the pure calculators behind resize and rotation.
//!
//! Nothing in this module knows about items, history, or events. The engine
//! feeds it a starting rectangle and a pointer position and gets back a new
//! rectangle or angle, which it then runs through the constraint resolver.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// An item's bounding rectangle plus its rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around the rectangle's center.
    #[serde(default)]
    pub rotation: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height, rotation: 0.0 }
    }

    /// Same rectangle with the given rotation.
    #[must_use]
    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    /// Same size and rotation, moved so the top-left corner is at `origin`.
    #[must_use]
    pub fn moved_to(self, origin: Point) -> Self {
        Self { x: origin.x, y: origin.y, ..self }
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center of the bounding box in canvas coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One of the eight compass handles on an item's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// All handles, clockwise from north.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
        ResizeHandle::Nw,
    ];

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }
}

/// Per-item limits applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    pub maintain_aspect_ratio: bool,
}

impl ResizeLimits {
    /// Limits with only a minimum size.
    #[must_use]
    pub fn min(min_width: f64, min_height: f64) -> Self {
        Self { min_width, min_height, max_width: None, max_height: None, maintain_aspect_ratio: false }
    }
}

/// Compute new bounds for dragging `handle` of `start` to `pointer`.
///
/// Each moved edge follows the pointer; the opposite edge stays fixed. Every
/// dimension is capped at the maximum (if any) and then floored at the
/// minimum before the rectangle is assembled, so the result never shrinks
/// below the limits even when the pointer crosses the opposite edge. With
/// `maintain_aspect_ratio`, the height is derived from the width using the
/// starting ratio; a derived height over the maximum shrinks both dimensions,
/// and one under the minimum grows both.
#[must_use]
pub fn resize_bounds(start: Position, handle: ResizeHandle, pointer: Point, limits: ResizeLimits) -> Position {
    let mut width = if handle.moves_right() {
        pointer.x - start.x
    } else if handle.moves_left() {
        start.right() - pointer.x
    } else {
        start.width
    };
    let mut height = if handle.moves_bottom() {
        pointer.y - start.y
    } else if handle.moves_top() {
        start.bottom() - pointer.y
    } else {
        start.height
    };
    width = cap(width, limits.max_width).max(limits.min_width);
    height = cap(height, limits.max_height).max(limits.min_height);

    if limits.maintain_aspect_ratio && start.height > 0.0 {
        let ratio = start.width / start.height;
        height = width / ratio;
        let capped = cap(height, limits.max_height);
        if capped < height {
            height = capped;
            width = height * ratio;
        }
        if height < limits.min_height {
            height = limits.min_height;
            width = height * ratio;
        }
    }

    let x = if handle.moves_left() { start.right() - width } else { start.x };
    let y = if handle.moves_top() { start.bottom() - height } else { start.y };

    Position { x, y, width, height, rotation: start.rotation }
}

fn cap(value: f64, max: Option<f64>) -> f64 {
    max.map_or(value, |m| value.min(m))
}

/// Angle in degrees of the ray from `center` through `pointer`.
///
/// `0` points along +x and `90` along +y (screen-down), in `(-180, 180]`.
#[must_use]
pub fn rotation_angle(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees()
}
