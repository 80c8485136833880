//! Path emission for ink outlines.
//!
//! Converts a closed outline polygon into a drawable path using midpoint
//! smoothing: the path moves to the first point, curves through the second
//! toward the midpoint of the second and third, then chains smooth quadratic
//! segments through each consecutive midpoint. Coordinates are rounded to
//! two fractional digits so emission is deterministic and path strings stay
//! bounded.

use kurbo::{BezPath, Point};

fn average(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Emit an outline as an SVG-style path string (`M`/`Q`/`T`, optionally `Z`).
///
/// Outlines with fewer than four points emit the empty string; there is
/// nothing drawable in them.
pub fn outline_to_svg(outline: &[Point], closed: bool) -> String {
    let len = outline.len();
    if len < 4 {
        return String::new();
    }

    let a = outline[0];
    let b = outline[1];
    let c = outline[2];

    let mut result = format!(
        "M{:.2},{:.2} Q{:.2},{:.2} {:.2},{:.2} T",
        a.x,
        a.y,
        b.x,
        b.y,
        average(b.x, c.x),
        average(b.y, c.y),
    );

    for i in 2..len - 1 {
        let a = outline[i];
        let b = outline[i + 1];
        result.push_str(&format!(
            "{:.2},{:.2} ",
            average(a.x, b.x),
            average(a.y, b.y)
        ));
    }

    if closed {
        result.push('Z');
    }

    result
}

/// Emit an outline as a fillable [`BezPath`] with the same command sequence
/// as [`outline_to_svg`]: the smooth (`T`) segments get their control point
/// by reflecting the previous control through the previous endpoint.
pub fn outline_to_bez(outline: &[Point], closed: bool) -> BezPath {
    let len = outline.len();
    let mut path = BezPath::new();
    if len < 4 {
        return path;
    }

    let rounded = |p: Point| Point::new(round2(p.x), round2(p.y));
    let midpoint = |a: Point, b: Point| {
        Point::new(round2(average(a.x, b.x)), round2(average(a.y, b.y)))
    };

    path.move_to(rounded(outline[0]));

    let mut ctrl = rounded(outline[1]);
    let mut end = midpoint(outline[1], outline[2]);
    path.quad_to(ctrl, end);

    for i in 2..len - 1 {
        // Smooth continuation: reflect the last control point.
        ctrl = Point::new(2.0 * end.x - ctrl.x, 2.0 * end.y - ctrl.y);
        end = midpoint(outline[i], outline[i + 1]);
        path.quad_to(ctrl, end);
    }

    if closed {
        path.close_path();
    }

    path
}
