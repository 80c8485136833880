//! Element definitions for the drawing surface.

mod circle;
mod line;
mod pencil;
mod rectangle;

pub use circle::Circle;
pub use line::Line;
pub use pencil::Pencil;
pub use rectangle::Rectangle;

use crate::error::SceneError;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for elements.
///
/// Ids are positional: an element's id equals its index in the scene's
/// ordered sequence at creation time and is never reused (there is no
/// delete operation).
pub type ElementId = usize;

/// Drawing tools available to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Pencil,
    Rectangle,
    Line,
    Circle,
}

impl Tool {
    /// All tools, in toolbar order.
    pub const ALL: [Tool; 4] = [Tool::Pencil, Tool::Rectangle, Tool::Line, Tool::Circle];

    /// Parse a tool name arriving from the host boundary.
    ///
    /// Unknown names are rejected here so that everything past this point
    /// works with the closed enum.
    pub fn from_name(name: &str) -> Result<Self, SceneError> {
        match name {
            "pencil" => Ok(Tool::Pencil),
            "rectangle" => Ok(Tool::Rectangle),
            "line" => Ok(Tool::Line),
            "circle" => Ok(Tool::Circle),
            other => Err(SceneError::InvalidTool(other.to_string())),
        }
    }

    /// Get the canonical name for this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Rectangle => "rectangle",
            Tool::Line => "line",
            Tool::Circle => "circle",
        }
    }
}

impl FromStr for Tool {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::from_name(s)
    }
}

/// Geometric descriptor handed to the sketchy rendering back end.
///
/// Built once when an element is created or extended, then replayed verbatim
/// on every redraw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// Axis-aligned rectangle. Width and height may be negative when the
    /// gesture dragged up or left; consumers normalize via [`Primitive::bounds`].
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Circle centered on the gesture start anchor. The diameter is the
    /// doubled sum of the drag deltas, not a Euclidean distance; this matches
    /// the established visual behavior and must not be "corrected".
    Circle {
        cx: f64,
        cy: f64,
        diameter: f64,
    },
}

impl Primitive {
    /// Normalized bounding box of the described geometry.
    pub fn bounds(&self) -> Rect {
        match *self {
            Primitive::Line { x1, y1, x2, y2 } => {
                Rect::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
            }
            Primitive::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let x2 = x + width;
                let y2 = y + height;
                Rect::new(x.min(x2), y.min(y2), x.max(x2), y.max(y2))
            }
            Primitive::Circle { cx, cy, diameter } => {
                let r = (diameter / 2.0).abs();
                Rect::new(cx - r, cy - r, cx + r, cy + r)
            }
        }
    }
}

/// Generate a seed for a newly constructed primitive.
///
/// Counter + splitmix32-style hash; unique per call without consulting the
/// clock, so it behaves on every platform.
pub(crate) fn generate_seed() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Enum wrapper for all element types.
///
/// A closed union: the factory, the scene store, and the render loop all
/// match exhaustively, so adding a tool updates the three in lockstep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Pencil(Pencil),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Line(e) => e.id,
            Element::Rectangle(e) => e.id,
            Element::Circle(e) => e.id,
            Element::Pencil(e) => e.id,
        }
    }

    /// The tool that created (and keeps extending) this element.
    pub fn tool(&self) -> Tool {
        match self {
            Element::Line(_) => Tool::Line,
            Element::Rectangle(_) => Tool::Rectangle,
            Element::Circle(_) => Tool::Circle,
            Element::Pencil(_) => Tool::Pencil,
        }
    }

    /// The precomputed sketch descriptor, for primitive variants.
    pub fn primitive(&self) -> Option<&Primitive> {
        match self {
            Element::Line(e) => Some(&e.primitive),
            Element::Rectangle(e) => Some(&e.primitive),
            Element::Circle(e) => Some(&e.primitive),
            Element::Pencil(_) => None,
        }
    }

    /// The sketch seed, for primitive variants.
    pub fn seed(&self) -> Option<u32> {
        match self {
            Element::Line(e) => Some(e.seed),
            Element::Rectangle(e) => Some(e.seed),
            Element::Circle(e) => Some(e.seed),
            Element::Pencil(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_from_name() {
        assert_eq!(Tool::from_name("pencil").unwrap(), Tool::Pencil);
        assert_eq!(Tool::from_name("rectangle").unwrap(), Tool::Rectangle);
        assert_eq!(Tool::from_name("line").unwrap(), Tool::Line);
        assert_eq!(Tool::from_name("circle").unwrap(), Tool::Circle);
    }

    #[test]
    fn test_tool_from_name_rejects_unknown() {
        let err = Tool::from_name("eraser").unwrap_err();
        assert_eq!(err, SceneError::InvalidTool("eraser".to_string()));
    }

    #[test]
    fn test_tool_name_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()).unwrap(), tool);
        }
    }

    #[test]
    fn test_rectangle_bounds_normalize_negative_size() {
        let prim = Primitive::Rectangle {
            x: 50.0,
            y: 50.0,
            width: -40.0,
            height: -40.0,
        };
        let bounds = prim.bounds();
        assert_eq!(bounds, Rect::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn test_seeds_are_unique() {
        let a = generate_seed();
        let b = generate_seed();
        assert_ne!(a, b);
    }
}
