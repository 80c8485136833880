//! Hand-drawn ("sketchy") renditions of primitive descriptors.
//!
//! Each primitive is turned into one or more stroke paths whose endpoints
//! are randomly offset and whose segments bow slightly, giving the
//! overshot-corner pencil look. All randomness flows from the element's
//! seed through a deterministic generator, so replaying the same descriptor
//! always yields the same paths.

use kurbo::{BezPath, Point, Vec2};
use sketchscan_core::{outline_to_bez, Primitive};

/// Prime multiplier decorrelating the second stroke pass from the first.
const SECOND_PASS_SALT: u32 = 99991;

/// Options for the sketchy effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchOptions {
    /// Overall wobble amount. 0 disables the effect entirely.
    pub roughness: f64,
    /// How strongly segments bow away from the straight line.
    pub bowing: f64,
    /// Maximum random endpoint offset in surface units.
    pub max_offset: f64,
    /// Number of ring samples used when sketching a circle.
    pub curve_steps: usize,
}

impl Default for SketchOptions {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            bowing: 1.0,
            max_offset: 2.0,
            curve_steps: 16,
        }
    }
}

/// Seeded xorshift32 generator for deterministic sketch randomness.
struct SketchRng {
    state: u32,
}

impl SketchRng {
    fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Random value in `[-1, 1]`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u32() as f64 / u32::MAX as f64) * 2.0 - 1.0
    }

    /// Random offset scaled by `amount`.
    fn offset(&mut self, amount: f64) -> f64 {
        self.next_f64() * amount
    }
}

/// Produce the sketchy stroke paths for a primitive descriptor.
///
/// Two passes with decorrelated randomness give the doubled-line look;
/// with `roughness` at 0 a single clean pass is emitted instead.
pub fn sketch_primitive(primitive: &Primitive, seed: u32, options: &SketchOptions) -> Vec<BezPath> {
    if options.roughness <= 0.0 {
        return vec![clean_path(primitive, options)];
    }

    (0..2)
        .map(|pass| {
            let mut rng = SketchRng::new(seed.wrapping_add(pass * SECOND_PASS_SALT));
            sketch_pass(primitive, &mut rng, options)
        })
        .collect()
}

/// One full rendition of the primitive with the given randomness stream.
fn sketch_pass(primitive: &Primitive, rng: &mut SketchRng, options: &SketchOptions) -> BezPath {
    let mut path = BezPath::new();
    match *primitive {
        Primitive::Line { x1, y1, x2, y2 } => {
            sketch_segment(
                &mut path,
                Point::new(x1, y1),
                Point::new(x2, y2),
                rng,
                options,
            );
        }
        Primitive::Rectangle {
            x,
            y,
            width,
            height,
        } => {
            // Corner order handles mirrored (negative-size) rectangles as-is.
            let corners = [
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ];
            for i in 0..4 {
                sketch_segment(&mut path, corners[i], corners[(i + 1) % 4], rng, options);
            }
        }
        Primitive::Circle { cx, cy, diameter } => {
            let ring = circle_ring(Point::new(cx, cy), diameter, rng, options);
            path.extend(outline_to_bez(&ring, true));
        }
    }
    path
}

/// Sketch one line segment: offset endpoints, bowed quadratic middle.
fn sketch_segment(
    path: &mut BezPath,
    start: Point,
    end: Point,
    rng: &mut SketchRng,
    options: &SketchOptions,
) {
    let delta = end - start;
    let length = delta.hypot();

    // Short segments get proportionally less overshoot.
    let mut offset = options.max_offset * options.roughness;
    if offset * offset * 100.0 > length * length {
        offset = length / 10.0;
    }

    let wobbled_start = Point::new(start.x + rng.offset(offset), start.y + rng.offset(offset));
    let wobbled_end = Point::new(end.x + rng.offset(offset), end.y + rng.offset(offset));

    let perpendicular = if length > 1e-3 {
        Vec2::new(-delta.y / length, delta.x / length)
    } else {
        Vec2::ZERO
    };
    let bow = rng.offset(options.bowing * options.roughness * length / 200.0);
    let control = start.midpoint(end) + perpendicular * bow;

    path.move_to(wobbled_start);
    path.quad_to(control, wobbled_end);
}

/// Perturbed sample ring around the circle, closed by the path emitter.
fn circle_ring(
    center: Point,
    diameter: f64,
    rng: &mut SketchRng,
    options: &SketchOptions,
) -> Vec<Point> {
    let radius = (diameter / 2.0).abs();
    let steps = options.curve_steps.max(8);
    let wobble = (radius * 0.05 * options.roughness).min(options.max_offset * options.roughness);

    (0..=steps)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64) / (steps as f64);
            let r = radius + rng.offset(wobble);
            Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect()
}

/// Straight rendition used when roughness is disabled.
fn clean_path(primitive: &Primitive, options: &SketchOptions) -> BezPath {
    let mut path = BezPath::new();
    match *primitive {
        Primitive::Line { x1, y1, x2, y2 } => {
            path.move_to(Point::new(x1, y1));
            path.line_to(Point::new(x2, y2));
        }
        Primitive::Rectangle { .. } => {
            let bounds = primitive.bounds();
            path.move_to(Point::new(bounds.x0, bounds.y0));
            path.line_to(Point::new(bounds.x1, bounds.y0));
            path.line_to(Point::new(bounds.x1, bounds.y1));
            path.line_to(Point::new(bounds.x0, bounds.y1));
            path.close_path();
        }
        Primitive::Circle { cx, cy, diameter } => {
            let steps = options.curve_steps.max(8);
            let radius = (diameter / 2.0).abs();
            let ring: Vec<Point> = (0..=steps)
                .map(|i| {
                    let angle = std::f64::consts::TAU * (i as f64) / (steps as f64);
                    Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
                })
                .collect();
            path.extend(outline_to_bez(&ring, true));
        }
    }
    path
}
