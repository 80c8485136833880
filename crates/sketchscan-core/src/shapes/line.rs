//! Straight-line element.

use super::{generate_seed, ElementId, Primitive};
use serde::{Deserialize, Serialize};

/// A straight line between the gesture's start and end anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
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

impl Line {
    /// Create a new line between two anchors.
    pub fn new(id: ElementId, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            id,
            x1,
            y1,
            x2,
            y2,
            primitive: Primitive::Line { x1, y1, x2, y2 },
            seed: generate_seed(),
        }
    }

    /// Length of the line segment.
    pub fn length(&self) -> f64 {
        let dx = self.x2 - self.x1;
        let dy = self.y2 - self.y1;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_creation() {
        let line = Line::new(0, 0.0, 0.0, 100.0, 0.0);
        assert!((line.length() - 100.0).abs() < f64::EPSILON);
        assert_eq!(
            line.primitive,
            Primitive::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 100.0,
                y2: 0.0
            }
        );
    }

    #[test]
    fn test_zero_size_line() {
        let line = Line::new(0, 25.0, 25.0, 25.0, 25.0);
        assert!(line.length().abs() < f64::EPSILON);
    }
}
