//! Area enclosed between two polygonal curves.
//!
//! The shorter curve is first densified until both have the same number of
//! points, then the region between them is cut into one quadrilateral per
//! segment pair and the quadrilateral areas are summed.

use crate::metrics::TraceDistance;
use crate::trace::{
    Point2D,
    Trace,
};

fn segment_lengths(curve: &[Point2D]) -> Vec<f64> {
    curve.windows(2).map(|w| w[0].distance(&w[1])).collect()
}

// Linear interpolation in x, a zero-width interval yields the right-hand y.
fn interp(
    x: f64,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
) -> f64 {
    if x1 == x0 {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Inserts points into `curve` until it has `target_len` points.
///
/// Each step splits the currently longest segment (first one on ties) at its
/// x midpoint.
pub fn densify(
    curve: &[Point2D],
    target_len: usize,
) -> Vec<Point2D> {
    let mut out = curve.to_vec();
    if out.is_empty() {
        return out;
    }
    if out.len() == 1 && target_len > 1 {
        // A single point is a zero-length segment.
        out.push(out[0]);
    }

    let mut lengths = segment_lengths(&out);
    while out.len() < target_len {
        let mut longest = 0;
        for (i, len) in lengths.iter().enumerate() {
            if *len > lengths[longest] {
                longest = i;
            }
        }

        let start = out[longest];
        let end = out[longest + 1];
        let new_x = (end.x + start.x) / 2.;
        let new_y = if start.x < end.x {
            interp(new_x, start.x, end.x, start.y, end.y)
        } else {
            interp(new_x, end.x, start.x, end.y, start.y)
        };
        let new_point = Point2D::new(new_x, new_y);

        out.insert(longest + 1, new_point);
        lengths[longest] = start.distance(&new_point);
        lengths.insert(longest + 1, new_point.distance(&end));
    }

    out
}

fn cross(
    a: (f64, f64),
    b: (f64, f64),
) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

fn edges(quad: &[Point2D; 4]) -> [(f64, f64); 4] {
    let mut out = [(0., 0.); 4];
    for i in 0..4 {
        let from = quad[i];
        let to = quad[(i + 1) % 4];
        out[i] = (to.x - from.x, to.y - from.y);
    }
    out
}

/// A quadrilateral is taken as simple when at least three of the cross
/// products of consecutive edges share a sign.
pub fn is_simple_quad(quad: &[Point2D; 4]) -> bool {
    let e = edges(quad);
    let crosses = [
        cross(e[0], e[1]),
        cross(e[1], e[2]),
        cross(e[2], e[3]),
        cross(e[3], e[0]),
    ];

    let mut agreeing = crosses.iter().filter(|c| **c >= 0.).count();
    if agreeing <= 1 {
        agreeing = crosses.iter().filter(|c| **c <= 0.).count();
    }
    agreeing > 2
}

/// Shoelace area of a polygon.
pub fn polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    let mut acc = 0.;
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        acc += points[i].x * prev.y - points[i].y * prev.x;
    }
    0.5 * acc.abs()
}

/// Area of the quadrilateral `a, b, c, d`, reordering the vertices when the
/// given order is self-intersecting.
pub fn quad_area(mut quad: [Point2D; 4]) -> f64 {
    if !is_simple_quad(&quad) {
        quad.swap(0, 1);
        if !is_simple_quad(&quad) {
            // Back to the original order, with the middle two swapped.
            quad.swap(0, 1);
            quad.swap(1, 2);
        }
    }
    polygon_area(&quad)
}

pub fn area_between_curves(
    a: &[Point2D],
    b: &[Point2D],
) -> f64 {
    let (reference, other) = if a.len() < b.len() { (b, a) } else { (a, b) };
    let other = densify(other, reference.len());

    let mut total = 0.;
    for i in 1..reference.len() {
        total += quad_area([reference[i - 1], reference[i], other[i], other[i - 1]]);
    }
    total
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Area;

impl TraceDistance for Area {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64 {
        area_between_curves(a.points(), b.points())
    }

    fn name(&self) -> &str {
        "area"
    }
}
