//! Vello-based draw surface implementation.

use crate::renderer::DrawSurface;
use crate::sketch::{sketch_primitive, SketchOptions};
use kurbo::{Affine, BezPath, Size, Stroke};
use peniko::{Color, Fill};
use sketchscan_core::Primitive;
use vello::Scene;

/// Result of rendering a scene to pixels: raw RGBA data plus dimensions.
#[derive(Debug)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Draw surface that builds a [`vello::Scene`] per frame.
pub struct VelloSurface {
    scene: Scene,
    viewport: Size,
    background: Color,
    ink: Color,
    stroke_width: f64,
    sketch_options: SketchOptions,
}

impl VelloSurface {
    /// Create a surface for the given viewport size.
    pub fn new(viewport: Size) -> Self {
        Self {
            scene: Scene::new(),
            viewport,
            background: Color::from_rgba8(236, 236, 244, 255),
            ink: Color::from_rgba8(24, 24, 27, 255),
            stroke_width: 2.0,
            sketch_options: SketchOptions::default(),
        }
    }

    /// Update the viewport size (host resize events land here).
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Set background and ink colors.
    pub fn with_colors(mut self, background: Color, ink: Color) -> Self {
        self.background = background;
        self.ink = ink;
        self
    }

    /// The built scene for this frame.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the built scene (resets the internal one).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl DrawSurface for VelloSurface {
    fn clear(&mut self) {
        self.scene.reset();
        let rect = self.viewport.to_rect();
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, self.background, None, &rect);
    }

    fn draw_sketch(&mut self, primitive: &Primitive, seed: u32) {
        let stroke = Stroke::new(self.stroke_width);
        for path in sketch_primitive(primitive, seed, &self.sketch_options) {
            self.scene
                .stroke(&stroke, Affine::IDENTITY, self.ink, None, &path);
        }
    }

    fn fill_path(&mut self, path: &BezPath) {
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, self.ink, None, path);
    }
}
