//! Circle element.

use super::{generate_seed, ElementId, Primitive};
use serde::{Deserialize, Serialize};

/// A circle centered on the gesture start anchor.
///
/// The effective diameter is `2 * ((x2 - x1) + (y2 - y1))`, the doubled sum
/// of the drag deltas rather than a Euclidean distance. The formula is
/// load-bearing for visual fidelity and must not be "corrected".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub id: ElementId,
    /// Gesture start anchor (the center).
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

impl Circle {
    /// Create a new circle from the gesture anchors.
    pub fn new(id: ElementId, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            id,
            x1,
            y1,
            x2,
            y2,
            primitive: Primitive::Circle {
                cx: x1,
                cy: y1,
                diameter: 2.0 * ((x2 - x1) + (y2 - y1)),
            },
            seed: generate_seed(),
        }
    }

    /// The effective diameter described by the anchors.
    pub fn diameter(&self) -> f64 {
        match self.primitive {
            Primitive::Circle { diameter, .. } => diameter,
            _ => unreachable!("circle element carries a circle primitive"),
        }
    }
}
