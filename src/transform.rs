//! Presentation helpers: the only place positions cross into renderer vocabulary.
//!
//! The engine hands out plain values; the host decides how to express them.
//! `Display` on both types produces the CSS strings existing DOM renderers
//! expect (`translate(10px, 20px) rotate(45deg)` and `50px 40px`).

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::fmt;

use serde::Serialize;

use crate::geometry::{Point, Position};

/// Translate-then-rotate transform for drawing an item at its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    /// Rotation in degrees, applied around the [`TransformOrigin`].
    pub rotate_deg: f64,
}

impl Transform {
    /// Row-major 2D affine matrix `[a, b, c, d, e, f]` equivalent to this
    /// transform with the rotation pivot at the item's local origin.
    #[must_use]
    pub fn to_matrix(&self) -> [f64; 6] {
        let (sin, cos) = self.rotate_deg.to_radians().sin_cos();
        [cos, sin, -sin, cos, self.translate_x, self.translate_y]
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({}px, {}px) rotate({}deg)", self.translate_x, self.translate_y, self.rotate_deg)
    }
}

/// Rotation pivot in item-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformOrigin {
    pub x: f64,
    pub y: f64,
}

impl From<TransformOrigin> for Point {
    fn from(o: TransformOrigin) -> Self {
        Point::new(o.x, o.y)
    }
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}px", self.x, self.y)
    }
}

#[must_use]
pub fn position_to_transform(position: &Position) -> Transform {
    Transform { translate_x: position.x, translate_y: position.y, rotate_deg: position.rotation }
}

/// The item's own center, relative to its top-left corner.
#[must_use]
pub fn transform_origin(position: &Position) -> TransformOrigin {
    TransformOrigin { x: position.width / 2.0, y: position.height / 2.0 }
}
