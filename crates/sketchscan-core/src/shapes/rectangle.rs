//! Axis-aligned rectangle element.

use super::{generate_seed, ElementId, Primitive};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A rectangle anchored at the gesture start, sized by the drag delta.
///
/// Dragging up or left produces a negative width/height; the stored anchors
/// are kept as-is and normalization happens when the geometry is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: ElementId,
    /// Gesture start anchor.
    pub x1: f64,
    pub y1: f64,
    /// Live end anchor, updated on every extend.
    pub x2: f64,
    pub y2: f64,
    /// Sketch descriptor, built once per create/extend.
    pub primitive: Primitive,
    /// Seed for the hand-drawn rendition.
    pub seed: u32,
}

impl Rectangle {
    /// Create a new rectangle from two corner anchors.
    pub fn new(id: ElementId, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            id,
            x1,
            y1,
            x2,
            y2,
            primitive: Primitive::Rectangle {
                x: x1,
                y: y1,
                width: x2 - x1,
                height: y2 - y1,
            },
            seed: generate_seed(),
        }
    }

    /// Normalized bounding box (positive width/height).
    pub fn bounds(&self) -> Rect {
        self.primitive.bounds()
    }
}
