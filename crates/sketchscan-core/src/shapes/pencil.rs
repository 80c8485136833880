//! Freehand pencil stroke element.

use super::ElementId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A freehand stroke as the raw ordered point samples of a gesture.
///
/// Points are append-only while the gesture is active; the stroke is created
/// seeded with its first sample, so the sequence is never empty in practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pencil {
    pub id: ElementId,
    /// Sampled points in gesture order.
    pub points: Vec<Point>,
}

impl Pencil {
    /// Create a new stroke seeded with its first sample.
    pub fn new(id: ElementId, x: f64, y: f64) -> Self {
        Self {
            id,
            points: vec![Point::new(x, y)],
        }
    }

    /// Append a sample to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the stroke has no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the sampled points.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pencil_seeded_with_start() {
        let pencil = Pencil::new(0, 5.0, 7.0);
        assert_eq!(pencil.len(), 1);
        assert_eq!(pencil.points[0], Point::new(5.0, 7.0));
    }

    #[test]
    fn test_add_points() {
        let mut pencil = Pencil::new(0, 0.0, 0.0);
        pencil.add_point(Point::new(10.0, 10.0));
        pencil.add_point(Point::new(20.0, 5.0));
        assert_eq!(pencil.len(), 3);
    }

    #[test]
    fn test_bounds() {
        let mut pencil = Pencil::new(0, 0.0, 0.0);
        pencil.add_point(Point::new(100.0, 50.0));
        pencil.add_point(Point::new(50.0, 100.0));
        assert_eq!(pencil.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }
}
