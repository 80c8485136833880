//! Element construction from gesture anchors.

use crate::shapes::{Circle, Element, ElementId, Line, Pencil, Rectangle, Tool};

/// Construct a new element for the given tool from two gesture anchors.
///
/// `(x1, y1)` is the gesture's start anchor and `(x2, y2)` the current end
/// anchor. For [`Tool::Pencil`] the end anchor is ignored; the stroke is
/// seeded with the single start point. Primitive variants carry their sketch
/// descriptor and a fresh seed, so each construction wobbles differently
/// while redraws of the finished element stay stable.
pub fn create_element(id: ElementId, x1: f64, y1: f64, x2: f64, y2: f64, tool: Tool) -> Element {
    match tool {
        Tool::Line => Element::Line(Line::new(id, x1, y1, x2, y2)),
        Tool::Rectangle => Element::Rectangle(Rectangle::new(id, x1, y1, x2, y2)),
        Tool::Circle => Element::Circle(Circle::new(id, x1, y1, x2, y2)),
        Tool::Pencil => Element::Pencil(Pencil::new(id, x1, y1)),
    }
}
