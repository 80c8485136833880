//! Draw-surface abstraction and the version-driven redraw loop.

use kurbo::BezPath;
use sketchscan_core::{outline_to_bez, stroke_outline, Element, Primitive, Scene, StrokeOptions};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("initialization failed: {0}")]
    InitFailed(String),
    #[error("render failed: {0}")]
    RenderFailed(String),
    #[error("surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// The drawing surface the redraw loop replays a scene onto.
///
/// Implementations provide a full clear, delegation to the sketchy back end
/// for primitive descriptors, and a filled-path operation for ink strokes.
pub trait DrawSurface {
    /// Clear the entire surface.
    fn clear(&mut self);

    /// Draw the hand-drawn rendition of a primitive descriptor.
    fn draw_sketch(&mut self, primitive: &Primitive, seed: u32);

    /// Fill a closed path with the current ink color.
    fn fill_path(&mut self, path: &BezPath);

    /// Push the drawing state before a replay. Surfaces without a state
    /// stack ignore this.
    fn save(&mut self) {}

    /// Pop the drawing state after a replay.
    fn restore(&mut self) {}
}

/// Replays the scene onto a surface whenever the scene version changes.
///
/// Every redraw is a full replay in ascending id order (painter's
/// algorithm): clear, then each element on top of the previous ones.
/// Replaying an unchanged scene twice produces identical draw commands.
#[derive(Debug, Clone, Default)]
pub struct RenderLoop {
    last_version: Option<u64>,
    stroke_options: StrokeOptions,
}

impl RenderLoop {
    /// Create a render loop with default ink options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a render loop with specific ink options.
    pub fn with_stroke_options(stroke_options: StrokeOptions) -> Self {
        Self {
            last_version: None,
            stroke_options,
        }
    }

    /// Redraw only if the scene version moved since the last render.
    /// Returns whether a redraw happened.
    pub fn render_if_changed(&mut self, scene: &Scene, surface: &mut dyn DrawSurface) -> bool {
        if self.last_version == Some(scene.version()) {
            return false;
        }
        log::debug!(
            "scene version {} ({} elements), redrawing",
            scene.version(),
            scene.len()
        );
        self.render(scene, surface);
        self.last_version = Some(scene.version());
        true
    }

    /// Unconditionally clear and replay the whole scene.
    pub fn render(&self, scene: &Scene, surface: &mut dyn DrawSurface) {
        surface.clear();
        surface.save();
        for element in scene.elements() {
            match element {
                Element::Line(line) => surface.draw_sketch(&line.primitive, line.seed),
                Element::Rectangle(rect) => surface.draw_sketch(&rect.primitive, rect.seed),
                Element::Circle(circle) => surface.draw_sketch(&circle.primitive, circle.seed),
                Element::Pencil(pencil) => {
                    if pencil.is_empty() {
                        continue;
                    }
                    // Degenerate strokes fall out here as empty paths.
                    let outline = stroke_outline(&pencil.points, &self.stroke_options);
                    let path = outline_to_bez(&outline, true);
                    if !path.elements().is_empty() {
                        surface.fill_path(&path);
                    }
                }
            }
        }
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchscan_core::{create_element, Tool};

    /// Surface double that records draw commands for comparison.
    #[derive(Debug, Clone, Default, PartialEq)]
    struct RecordingSurface {
        commands: Vec<DrawCommand>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum DrawCommand {
        Clear,
        Sketch { primitive: Primitive, seed: u32 },
        Fill(String),
    }

    impl DrawSurface for RecordingSurface {
        fn clear(&mut self) {
            self.commands.push(DrawCommand::Clear);
        }

        fn draw_sketch(&mut self, primitive: &Primitive, seed: u32) {
            self.commands.push(DrawCommand::Sketch {
                primitive: *primitive,
                seed,
            });
        }

        fn fill_path(&mut self, path: &BezPath) {
            self.commands.push(DrawCommand::Fill(path.to_svg()));
        }
    }

    fn scene_with_stroke() -> Scene {
        let mut scene = Scene::new();
        scene.append(create_element(0, 0.0, 0.0, 40.0, 40.0, Tool::Rectangle));
        scene.append(create_element(1, 10.0, 10.0, 10.0, 10.0, Tool::Pencil));
        for i in 1..12 {
            scene
                .extend(1, 10.0, 10.0, 10.0 + 4.0 * i as f64, 10.0, Tool::Pencil)
                .unwrap();
        }
        scene
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let scene = scene_with_stroke();
        let render_loop = RenderLoop::new();

        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        render_loop.render(&scene, &mut first);
        render_loop.render(&scene, &mut second);

        assert!(!first.commands.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_painter_order() {
        let mut scene = Scene::new();
        scene.append(create_element(0, 0.0, 0.0, 10.0, 10.0, Tool::Line));
        scene.append(create_element(1, 5.0, 5.0, 15.0, 15.0, Tool::Circle));

        let mut surface = RecordingSurface::default();
        RenderLoop::new().render(&scene, &mut surface);

        assert_eq!(surface.commands.len(), 3);
        assert_eq!(surface.commands[0], DrawCommand::Clear);
        assert!(matches!(
            surface.commands[1],
            DrawCommand::Sketch {
                primitive: Primitive::Line { .. },
                ..
            }
        ));
        assert!(matches!(
            surface.commands[2],
            DrawCommand::Sketch {
                primitive: Primitive::Circle { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_single_point_stroke_renders_nothing() {
        let mut scene = Scene::new();
        scene.append(create_element(0, 10.0, 10.0, 10.0, 10.0, Tool::Pencil));

        let mut surface = RecordingSurface::default();
        RenderLoop::new().render(&scene, &mut surface);

        assert_eq!(surface.commands, vec![DrawCommand::Clear]);
    }

    #[test]
    fn test_long_stroke_fills_a_path() {
        let scene = scene_with_stroke();
        let mut surface = RecordingSurface::default();
        RenderLoop::new().render(&scene, &mut surface);

        assert!(surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Fill(svg) if !svg.is_empty())));
    }

    #[test]
    fn test_render_if_changed_tracks_version() {
        let mut scene = Scene::new();
        scene.append(create_element(0, 0.0, 0.0, 10.0, 10.0, Tool::Line));

        let mut render_loop = RenderLoop::new();
        let mut surface = RecordingSurface::default();

        assert!(render_loop.render_if_changed(&scene, &mut surface));
        assert!(!render_loop.render_if_changed(&scene, &mut surface));

        scene.extend(0, 0.0, 0.0, 20.0, 20.0, Tool::Line).unwrap();
        assert!(render_loop.render_if_changed(&scene, &mut surface));
    }
}
