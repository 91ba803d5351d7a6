use crate::metrics::TraceDistance;
use crate::trace::{
    Point2D,
    Trace,
};

/// Discrete Fréchet distance.
///
/// Dynamic program over the `|a| x |b|` coupling matrix, where each cell
/// holds the best achievable worst-case distance of a monotonic coupling
/// ending at `(i, j)`. Only the previous row is kept around.
pub fn frechet_distance(
    a: &[Point2D],
    b: &[Point2D],
) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.;
    }

    let mut prev_row = vec![0f64; b.len()];
    let mut curr_row = vec![0f64; b.len()];

    for (i, pa) in a.iter().enumerate() {
        for (j, pb) in b.iter().enumerate() {
            let d = pa.distance(pb);
            curr_row[j] = match (i, j) {
                (0, 0) => d,
                (0, _) => curr_row[j - 1].max(d),
                (_, 0) => prev_row[0].max(d),
                _ => prev_row[j].min(curr_row[j - 1]).min(prev_row[j - 1]).max(d),
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len() - 1]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Frechet;

impl TraceDistance for Frechet {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64 {
        frechet_distance(a.points(), b.points())
    }

    fn name(&self) -> &str {
        "frechet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(f64, f64)]) -> Vec<Point2D> {
        v.iter().map(|p| Point2D::from(*p)).collect()
    }

    #[test]
    fn test_parallel_offset() {
        let a = pts(&[(0., 0.), (1., 0.), (2., 0.)]);
        let b = pts(&[(0., 1.), (1., 1.), (2., 1.)]);
        assert_eq!(frechet_distance(&a, &b), 1.);
        assert_eq!(frechet_distance(&a, &a), 0.);
    }

    #[test]
    fn test_order_matters() {
        // Same point set, opposite direction: the coupling has to pair the
        // first point of one with the first point of the other.
        let a = pts(&[(0., 0.), (4., 0.)]);
        let b = pts(&[(4., 0.), (0., 0.)]);
        assert_eq!(frechet_distance(&a, &b), 4.);
    }

    #[test]
    fn test_uneven_lengths() {
        let a = pts(&[(0., 0.), (1., 0.), (2., 0.), (3., 0.)]);
        let b = pts(&[(0., 0.), (3., 0.)]);
        // (1,0) and (2,0) can pair with either end, best worst case is 1.
        assert_eq!(frechet_distance(&a, &b), 1.);
        assert_eq!(frechet_distance(&b, &a), 1.);
    }

    #[test]
    fn test_single_point_is_max_distance() {
        let a = pts(&[(0., 0.)]);
        let b = pts(&[(3., 4.), (0., 1.)]);
        assert_eq!(frechet_distance(&a, &b), 5.);
    }
}
