//! Scene store: the ordered, versioned collection of drawn elements.

use crate::error::SceneError;
use crate::factory::create_element;
use crate::shapes::{Element, ElementId, Tool};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Ordered collection of elements with a monotonic version counter.
///
/// The scene is the sole owner of all elements. Every mutation bumps the
/// version; the render loop redraws when it observes a version change.
/// Elements are append-only and the element at index `i` has id `i`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    elements: Vec<Element>,
    #[serde(skip)]
    version: u64,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scene version. Starts at 0 and increases on every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the scene has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The id the next appended element will receive.
    pub fn next_id(&self) -> ElementId {
        self.elements.len()
    }

    /// Read-only view of an element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Read-only iterator over elements in draw order (ascending id).
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Append a new element to the end of the scene.
    pub fn append(&mut self, element: Element) {
        self.elements.push(element);
        self.version += 1;
    }

    /// Mutate the in-progress element at `id` with a new end anchor.
    ///
    /// Primitive tools replace the element wholesale with a freshly
    /// constructed one: original start anchor, new end anchor. The pencil
    /// tool appends `(x2, y2)` to the stroke's point list. The element's id
    /// and variant never change here; callers pass the tool that created it.
    pub fn extend(
        &mut self,
        id: ElementId,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        tool: Tool,
    ) -> Result<(), SceneError> {
        let len = self.elements.len();
        let slot = self
            .elements
            .get_mut(id)
            .ok_or(SceneError::IndexOutOfRange { id, len })?;

        match tool {
            Tool::Line | Tool::Rectangle | Tool::Circle => {
                *slot = create_element(id, x1, y1, x2, y2, tool);
            }
            Tool::Pencil => {
                if let Element::Pencil(pencil) = slot {
                    // The factory seeds every stroke with one point; an empty
                    // list here means that invariant was bypassed, and the
                    // push below still leaves a usable single-point stroke.
                    if pencil.is_empty() {
                        log::warn!("pencil element {id} extended with no seed point");
                    }
                    pencil.add_point(Point::new(x2, y2));
                }
            }
        }

        self.version += 1;
        Ok(())
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Pencil;

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.version(), 0);
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut scene = Scene::new();
        for i in 0..3 {
            let id = scene.next_id();
            assert_eq!(id, i);
            scene.append(create_element(id, 0.0, 0.0, 1.0, 1.0, Tool::Line));
        }
        assert_eq!(scene.len(), 3);
        for (i, element) in scene.elements().enumerate() {
            assert_eq!(element.id(), i);
        }
    }

    #[test]
    fn test_version_bumps_on_mutation() {
        let mut scene = Scene::new();
        scene.append(create_element(0, 0.0, 0.0, 1.0, 1.0, Tool::Rectangle));
        assert_eq!(scene.version(), 1);
        scene.extend(0, 0.0, 0.0, 5.0, 5.0, Tool::Rectangle).unwrap();
        assert_eq!(scene.version(), 2);
    }

    #[test]
    fn test_extend_primitive_recomputes() {
        let mut scene = Scene::new();
        scene.append(create_element(0, 10.0, 10.0, 10.0, 10.0, Tool::Line));
        scene.extend(0, 10.0, 10.0, 30.0, 10.0, Tool::Line).unwrap();

        match scene.get(0).unwrap() {
            Element::Line(line) => {
                assert_eq!((line.x1, line.y1, line.x2, line.y2), (10.0, 10.0, 30.0, 10.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_extend_pencil_appends_point() {
        let mut scene = Scene::new();
        scene.append(create_element(0, 1.0, 1.0, 1.0, 1.0, Tool::Pencil));
        scene.extend(0, 1.0, 1.0, 2.0, 2.0, Tool::Pencil).unwrap();
        scene.extend(0, 1.0, 1.0, 3.0, 3.0, Tool::Pencil).unwrap();

        match scene.get(0).unwrap() {
            Element::Pencil(pencil) => {
                assert_eq!(pencil.len(), 3);
                assert_eq!(pencil.points[2], Point::new(3.0, 3.0));
            }
            other => panic!("expected pencil, got {other:?}"),
        }
    }

    #[test]
    fn test_extend_pencil_without_seed_point() {
        let mut scene = Scene::new();
        scene.append(Element::Pencil(Pencil {
            id: 0,
            points: Vec::new(),
        }));

        scene.extend(0, 0.0, 0.0, 4.0, 5.0, Tool::Pencil).unwrap();

        match scene.get(0).unwrap() {
            Element::Pencil(pencil) => {
                assert_eq!(pencil.points, vec![Point::new(4.0, 5.0)]);
            }
            other => panic!("expected pencil, got {other:?}"),
        }
    }

    #[test]
    fn test_extend_out_of_range() {
        let mut scene = Scene::new();
        scene.append(create_element(0, 0.0, 0.0, 1.0, 1.0, Tool::Line));

        let err = scene.extend(3, 0.0, 0.0, 1.0, 1.0, Tool::Line).unwrap_err();
        assert_eq!(err, SceneError::IndexOutOfRange { id: 3, len: 1 });
        // Store untouched.
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.version(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut scene = Scene::new();
        scene.append(create_element(0, 0.0, 0.0, 10.0, 10.0, Tool::Rectangle));
        scene.append(create_element(1, 5.0, 5.0, 5.0, 5.0, Tool::Pencil));

        let json = scene.to_json().unwrap();
        let restored = Scene::from_json(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get(1).unwrap().tool(), Tool::Pencil);
    }
}
