//! Point-to-set metrics: `average`, `maximum` and `hausdorff`.
//!
//! These treat a trace as an unordered cloud of points.

use crate::metrics::TraceDistance;
use crate::trace::{
    Point2D,
    Trace,
};

/// For each point in `from`, the minimum distance to any point of `to`.
pub fn min_distances_to(
    from: &[Point2D],
    to: &[Point2D],
) -> Vec<f64> {
    from.iter()
        .map(|p| {
            to.iter()
                .map(|q| p.distance(q))
                .fold(f64::INFINITY, f64::min)
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Mean of the two directed average nearest-point distances.
pub fn average_distance(
    a: &[Point2D],
    b: &[Point2D],
) -> f64 {
    let avg_a_to_b = mean(&min_distances_to(a, b));
    let avg_b_to_a = mean(&min_distances_to(b, a));
    (avg_a_to_b + avg_b_to_a) / 2.
}

/// Largest nearest-point distance across both directions.
pub fn maximum_distance(
    a: &[Point2D],
    b: &[Point2D],
) -> f64 {
    let a_to_b = min_distances_to(a, b);
    let b_to_a = min_distances_to(b, a);
    max(&a_to_b).max(max(&b_to_a))
}

/// Directed Hausdorff distance from `a` to `b`.
///
/// Uses the early-break scan from Taha & Hanbury (2015): the inner loop
/// stops as soon as a point of `b` is closer than the running maximum,
/// since that `a` point can no longer raise it.
pub fn directed_hausdorff(
    a: &[Point2D],
    b: &[Point2D],
) -> f64 {
    let mut cmax = 0.;
    for p in a {
        let mut cmin = f64::INFINITY;
        let mut broke_early = false;
        for q in b {
            let d = p.distance(q);
            if d < cmax {
                broke_early = true;
                break;
            }
            if d < cmin {
                cmin = d;
            }
        }
        if !broke_early && cmin != f64::INFINITY && cmin > cmax {
            cmax = cmin;
        }
    }
    cmax
}

pub fn hausdorff_distance(
    a: &[Point2D],
    b: &[Point2D],
) -> f64 {
    directed_hausdorff(a, b).max(directed_hausdorff(b, a))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Average;

impl TraceDistance for Average {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64 {
        average_distance(a.points(), b.points())
    }

    fn name(&self) -> &str {
        "average"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Maximum;

impl TraceDistance for Maximum {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64 {
        maximum_distance(a.points(), b.points())
    }

    fn name(&self) -> &str {
        "maximum"
    }
}

/// Same value as [`Maximum`], computed independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hausdorff;

impl TraceDistance for Hausdorff {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64 {
        hausdorff_distance(a.points(), b.points())
    }

    fn name(&self) -> &str {
        "hausdorff"
    }
}
