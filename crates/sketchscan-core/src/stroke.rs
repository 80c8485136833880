//! Freehand ink outline generation.
//!
//! Turns the raw ordered samples of a pencil gesture into a closed outline
//! polygon around the implied centerline, with width modulated by simulated
//! pressure. Pressure is derived from sample spacing: slow, dense sampling
//! reads as heavy pressure (wide ink), fast sparse sampling as light
//! pressure (thin ink). The outline tapers toward both stroke ends and is
//! capped with rounded arcs.

use kurbo::{Point, Vec2};

/// Number of arc segments used for each rounded end cap.
const CAP_SEGMENTS: usize = 8;

/// Minimum distance between consecutive samples; closer samples are merged.
const MIN_SAMPLE_DISTANCE: f64 = 0.01;

/// Options controlling the ink outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeOptions {
    /// Full stroke width at neutral pressure.
    pub size: f64,
    /// How strongly simulated pressure modulates the width (0 = constant
    /// width, 1 = full modulation).
    pub thinning: f64,
    /// How much each incoming sample is pulled toward the previous one
    /// before use (0 = raw samples, 1 = maximum smoothing).
    pub streamline: f64,
    /// Distance over which the stroke tapers at each end.
    pub taper: f64,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            size: 8.0,
            thinning: 0.7,
            streamline: 0.5,
            taper: 8.0,
        }
    }
}

/// Ink radius at a point given its simulated pressure.
fn stroke_radius(size: f64, thinning: f64, pressure: f64) -> f64 {
    size * (0.5 - thinning * (0.5 - pressure))
}

/// A centerline sample enriched with spacing data.
struct StrokePoint {
    point: Point,
    /// Unit direction of travel into this point.
    vector: Vec2,
    /// Accumulated length of the centerline up to this point.
    running_length: f64,
    /// Simulated pressure in `0..=1`.
    pressure: f64,
}

/// Compute the closed outline polygon for a stroke.
///
/// Degenerate input (fewer than two distinct samples) produces an empty
/// outline; callers render nothing for it.
pub fn stroke_outline(points: &[Point], options: &StrokeOptions) -> Vec<Point> {
    let stroke = stroke_points(points, options);
    if stroke.len() < 2 {
        return Vec::new();
    }

    let total_length = stroke.last().map(|p| p.running_length).unwrap_or(0.0);

    let mut left: Vec<Point> = Vec::with_capacity(stroke.len());
    let mut right: Vec<Point> = Vec::with_capacity(stroke.len());

    for sp in &stroke {
        let mut radius = if options.thinning > 0.0 {
            stroke_radius(options.size, options.thinning, sp.pressure)
        } else {
            options.size / 2.0
        };

        if options.taper > 0.0 {
            let from_start = (sp.running_length / options.taper).min(1.0);
            let from_end = ((total_length - sp.running_length) / options.taper).min(1.0);
            radius *= from_start.min(from_end).max(0.05);
        }

        // Perpendicular to the direction of travel.
        let offset = Vec2::new(-sp.vector.y, sp.vector.x) * radius;
        left.push(sp.point + offset);
        right.push(sp.point - offset);
    }

    let first = &stroke[0];
    let last = &stroke[stroke.len() - 1];

    let mut outline = Vec::with_capacity(left.len() + right.len() + 2 * CAP_SEGMENTS);
    outline.extend(left.iter().copied());
    // Rounded end cap: sweep the left-side offset across the stroke tip.
    outline.extend(cap_arc(last.point, *left.last().unwrap()));
    outline.extend(right.iter().rev().copied());
    // Rounded start cap back toward the first left-side point.
    outline.extend(cap_arc(first.point, right[0]));

    outline
}

/// Streamline raw samples and derive spacing, direction, and pressure.
fn stroke_points(points: &[Point], options: &StrokeOptions) -> Vec<StrokePoint> {
    if points.len() < 2 {
        return Vec::new();
    }

    // Pull each sample toward its predecessor to damp jitter.
    let t = 0.15 + (1.0 - options.streamline.clamp(0.0, 1.0)) * 0.85;
    let mut smoothed: Vec<Point> = Vec::with_capacity(points.len());
    smoothed.push(points[0]);
    for &p in &points[1..] {
        let prev = *smoothed.last().unwrap();
        let next = prev.lerp(p, t);
        if prev.distance(next) >= MIN_SAMPLE_DISTANCE {
            smoothed.push(next);
        }
    }

    if smoothed.len() < 2 {
        return Vec::new();
    }

    let mut stroke: Vec<StrokePoint> = Vec::with_capacity(smoothed.len());
    let mut running_length = 0.0;
    let mut pressure = 0.5;

    for (i, &point) in smoothed.iter().enumerate() {
        let (vector, distance) = if i == 0 {
            (Vec2::ZERO, 0.0)
        } else {
            let prev = smoothed[i - 1];
            let delta = point - prev;
            let distance = delta.hypot();
            (delta / distance, distance)
        };

        running_length += distance;

        // Spacing-based pressure: approach the target at half rate so a
        // single outlier sample cannot snap the width.
        if i > 0 {
            let target = 1.0 - (distance / options.size).min(1.0);
            pressure += (target - pressure) * 0.5;
        }

        stroke.push(StrokePoint {
            point,
            vector,
            running_length,
            pressure,
        });
    }

    // The first point has no incoming direction; borrow the second's.
    let v1 = stroke[1].vector;
    stroke[0].vector = v1;
    let p1 = stroke[1].pressure;
    stroke[0].pressure = p1;

    stroke
}

/// Points of a half-circle sweep from `from` around `center`.
fn cap_arc(center: Point, from: Point) -> Vec<Point> {
    let offset = from - center;
    let mut arc = Vec::with_capacity(CAP_SEGMENTS);
    for i in 1..=CAP_SEGMENTS {
        let angle = -std::f64::consts::PI * (i as f64) / (CAP_SEGMENTS as f64 + 1.0);
        let (sin, cos) = angle.sin_cos();
        let rotated = Vec2::new(
            offset.x * cos - offset.y * sin,
            offset.x * sin + offset.y * cos,
        );
        arc.push(center + rotated);
    }
    arc
}
