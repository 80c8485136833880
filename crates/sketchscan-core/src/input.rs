//! Gesture normalization for mouse and touch input.
//!
//! Pointer and touch event streams are reduced to a single begin/extend/end
//! gesture stream that drives scene mutations. Only the first active touch
//! point drives a gesture; additional fingers are ignored. A configurable
//! vertical offset is subtracted from raw y-coordinates to compensate for a
//! toolbar occupying the top of the viewport.

use crate::factory::create_element;
use crate::scene::Scene;
use crate::shapes::{ElementId, Tool};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer (mouse) event, already in surface coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
}

/// Touch event for a single touch point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum TouchEvent {
    Start { id: u64, position: Point },
    Move { id: u64, position: Point },
    End { id: u64 },
    Cancel { id: u64 },
}

/// The gesture currently in flight.
#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    /// Id of the element being extended.
    element: ElementId,
    /// Fixed start anchor captured at begin.
    start: Point,
    /// Tool captured at begin; tool changes never apply mid-gesture.
    tool: Tool,
}

/// Translates normalized gestures into scene mutations.
#[derive(Debug, Clone)]
pub struct GestureController {
    tool: Tool,
    y_offset: f64,
    active: Option<ActiveGesture>,
    active_touch: Option<u64>,
}

impl GestureController {
    /// Create a controller with the given starting tool.
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            y_offset: 0.0,
            active: None,
            active_touch: None,
        }
    }

    /// Set the vertical offset subtracted from raw input y-coordinates.
    pub fn with_y_offset(mut self, y_offset: f64) -> Self {
        self.y_offset = y_offset;
        self
    }

    /// The tool new gestures will use.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Select the tool for subsequent gestures. A gesture already in flight
    /// keeps the tool it was begun with.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Whether a gesture is currently active.
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a gesture: create a new element at `(x, y)` and append it.
    ///
    /// Beginning while a gesture is active simply replaces it
    /// (last-writer-wins; overlapping input devices are not arbitrated).
    pub fn begin(&mut self, x: f64, y: f64, scene: &mut Scene) {
        let id = scene.next_id();
        scene.append(create_element(id, x, y, x, y, self.tool));
        self.active = Some(ActiveGesture {
            element: id,
            start: Point::new(x, y),
            tool: self.tool,
        });
    }

    /// Extend the active gesture to `(x, y)`. No-op when no gesture is
    /// active.
    pub fn extend(&mut self, x: f64, y: f64, scene: &mut Scene) {
        let Some(active) = self.active else {
            return;
        };
        if let Err(err) = scene.extend(
            active.element,
            active.start.x,
            active.start.y,
            x,
            y,
            active.tool,
        ) {
            // The gesture's element always exists in the scene it was begun
            // on; reaching this means the scene was swapped underneath us.
            log::error!("gesture extend failed: {err}");
            self.active = None;
        }
    }

    /// End the active gesture. The element stays in the scene and becomes
    /// immutable by convention: no further extends will target it.
    pub fn end(&mut self) {
        self.active = None;
    }

    /// Handle a normalized pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, scene: &mut Scene) {
        match event {
            PointerEvent::Down { position } => {
                self.begin(position.x, position.y - self.y_offset, scene)
            }
            PointerEvent::Move { position } => {
                self.extend(position.x, position.y - self.y_offset, scene)
            }
            PointerEvent::Up => self.end(),
        }
    }

    /// Handle a touch event. Only the first active touch drives the gesture.
    pub fn handle_touch_event(&mut self, event: TouchEvent, scene: &mut Scene) {
        match event {
            TouchEvent::Start { id, position } => {
                if self.active_touch.is_some() {
                    return;
                }
                self.active_touch = Some(id);
                self.begin(position.x, position.y - self.y_offset, scene);
            }
            TouchEvent::Move { id, position } => {
                if self.active_touch != Some(id) {
                    return;
                }
                self.extend(position.x, position.y - self.y_offset, scene);
            }
            // A cancelled touch finalizes the in-progress element just like
            // a normal lift; nothing is deleted and no gesture state lingers.
            TouchEvent::End { id } | TouchEvent::Cancel { id } => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                    self.end();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Element;

    #[test]
    fn test_line_gesture_last_extend_wins() {
        let mut scene = Scene::new();
        let mut gestures = GestureController::new(Tool::Line);

        gestures.begin(10.0, 10.0, &mut scene);
        gestures.extend(20.0, 20.0, &mut scene);
        gestures.extend(30.0, 10.0, &mut scene);
        gestures.end();

        assert_eq!(scene.len(), 1);
        match scene.get(0).unwrap() {
            Element::Line(line) => {
                assert_eq!((line.x1, line.y1, line.x2, line.y2), (10.0, 10.0, 30.0, 10.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_extend_before_begin_is_noop() {
        let mut scene = Scene::new();
        let mut gestures = GestureController::new(Tool::Rectangle);

        gestures.extend(50.0, 50.0, &mut scene);
        assert!(scene.is_empty());
        assert_eq!(scene.version(), 0);
    }

    #[test]
    fn test_tool_captured_at_begin() {
        let mut scene = Scene::new();
        let mut gestures = GestureController::new(Tool::Pencil);

        gestures.begin(0.0, 0.0, &mut scene);
        gestures.set_tool(Tool::Line);
        gestures.extend(5.0, 5.0, &mut scene);
        gestures.end();

        match scene.get(0).unwrap() {
            Element::Pencil(pencil) => assert_eq!(pencil.len(), 2),
            other => panic!("expected pencil, got {other:?}"),
        }
    }

    #[test]
    fn test_pointer_y_offset() {
        let mut scene = Scene::new();
        let mut gestures = GestureController::new(Tool::Line).with_y_offset(85.0);

        gestures.handle_pointer_event(
            PointerEvent::Down {
                position: Point::new(10.0, 100.0),
            },
            &mut scene,
        );
        gestures.handle_pointer_event(PointerEvent::Up, &mut scene);

        match scene.get(0).unwrap() {
            Element::Line(line) => {
                assert_eq!((line.x1, line.y1), (10.0, 15.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_secondary_touches_ignored() {
        let mut scene = Scene::new();
        let mut gestures = GestureController::new(Tool::Pencil);

        gestures.handle_touch_event(
            TouchEvent::Start {
                id: 1,
                position: Point::new(0.0, 0.0),
            },
            &mut scene,
        );
        // Second finger: ignored entirely.
        gestures.handle_touch_event(
            TouchEvent::Start {
                id: 2,
                position: Point::new(100.0, 100.0),
            },
            &mut scene,
        );
        gestures.handle_touch_event(
            TouchEvent::Move {
                id: 2,
                position: Point::new(110.0, 110.0),
            },
            &mut scene,
        );
        gestures.handle_touch_event(
            TouchEvent::Move {
                id: 1,
                position: Point::new(5.0, 5.0),
            },
            &mut scene,
        );
        gestures.handle_touch_event(TouchEvent::End { id: 2 }, &mut scene);
        assert!(gestures.is_drawing());
        gestures.handle_touch_event(TouchEvent::End { id: 1 }, &mut scene);
        assert!(!gestures.is_drawing());

        assert_eq!(scene.len(), 1);
        match scene.get(0).unwrap() {
            Element::Pencil(pencil) => {
                assert_eq!(pencil.points, vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
            }
            other => panic!("expected pencil, got {other:?}"),
        }
    }

    #[test]
    fn test_touch_cancel_finalizes() {
        let mut scene = Scene::new();
        let mut gestures = GestureController::new(Tool::Rectangle);

        gestures.handle_touch_event(
            TouchEvent::Start {
                id: 7,
                position: Point::new(0.0, 0.0),
            },
            &mut scene,
        );
        gestures.handle_touch_event(
            TouchEvent::Move {
                id: 7,
                position: Point::new(20.0, 30.0),
            },
            &mut scene,
        );
        gestures.handle_touch_event(TouchEvent::Cancel { id: 7 }, &mut scene);

        assert!(!gestures.is_drawing());
        let version = scene.version();
        // A stray move after cancel mutates nothing.
        gestures.handle_touch_event(
            TouchEvent::Move {
                id: 7,
                position: Point::new(99.0, 99.0),
            },
            &mut scene,
        );
        assert_eq!(scene.version(), version);
    }

    #[test]
    fn test_begin_replaces_active_gesture() {
        let mut scene = Scene::new();
        let mut gestures = GestureController::new(Tool::Line);

        gestures.begin(0.0, 0.0, &mut scene);
        gestures.begin(50.0, 50.0, &mut scene);
        gestures.extend(60.0, 60.0, &mut scene);

        // Two elements; only the second one was extended.
        assert_eq!(scene.len(), 2);
        match scene.get(1).unwrap() {
            Element::Line(line) => assert_eq!((line.x2, line.y2), (60.0, 60.0)),
            other => panic!("expected line, got {other:?}"),
        }
        match scene.get(0).unwrap() {
            Element::Line(line) => assert_eq!((line.x2, line.y2), (0.0, 0.0)),
            other => panic!("expected line, got {other:?}"),
        }
    }
}
