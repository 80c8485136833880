//! SketchScan Core Library
//!
//! Platform-agnostic scene model and stroke pipeline for the SketchScan
//! drawing surface.

pub mod error;
pub mod factory;
pub mod input;
pub mod path;
pub mod scene;
pub mod shapes;
pub mod stroke;

pub use error::SceneError;
pub use factory::create_element;
pub use input::{GestureController, PointerEvent, TouchEvent};
pub use path::{outline_to_bez, outline_to_svg};
pub use scene::Scene;
pub use shapes::{Element, ElementId, Primitive, Tool};
pub use stroke::{stroke_outline, StrokeOptions};
