//! SketchScan rendering: sketchy primitive generation, the draw-surface
//! abstraction, and the vello-backed implementation.

mod renderer;
mod sketch;
mod vello_impl;

pub use renderer::{DrawSurface, RenderLoop, RendererError};
pub use sketch::{sketch_primitive, SketchOptions};
pub use vello_impl::{PngRenderResult, VelloSurface};
