use log::trace;
use rayon::prelude::*;

use crate::clustering::search::find_most_distant;
use crate::clustering::TraceSpace;
use crate::errors::{
    ClusteringError,
    Result,
};
use crate::metrics::TraceDistance;
use crate::trace::{
    TraceGroup,
    TraceId,
};

/// Splits a group in two around a pair of centers.
///
/// The first trace is the first center, the trace most distant from it the
/// second one. Every other trace goes to the center it is strictly closer
/// to, ties go to the second center. Both halves are non-empty and keep the
/// input order.
pub fn bisect_group<D>(
    space: &TraceSpace<'_, D>,
    group: &[TraceId],
) -> Result<(TraceGroup, TraceGroup)>
where
    D: TraceDistance + Sync + ?Sized,
{
    if group.len() < 2 {
        return Err(ClusteringError::GroupTooSmall { found: group.len() });
    }

    let center1 = group[0];
    let mut center2 = find_most_distant(space, center1, group);
    if center2 == center1 {
        // Nothing is farther than zero, seed the second half with the next trace.
        center2 = group[1];
    }

    let rest = group
        .iter()
        .copied()
        .filter(|t| *t != center1 && *t != center2)
        .collect::<Vec<_>>();

    let distances = rest
        .par_iter()
        .map(|t| (space.distance(center1, *t), space.distance(center2, *t)))
        .collect::<Vec<_>>();

    let mut out1 = vec![center1];
    let mut out2 = vec![center2];
    for (t, (diff1, diff2)) in rest.into_iter().zip(distances) {
        if diff1 < diff2 {
            out1.push(t);
        } else {
            out2.push(t);
        }
    }

    trace!(
        "Bisected {} traces around {} and {} into {} + {}",
        group.len(),
        center1,
        center2,
        out1.len(),
        out2.len()
    );
    debug_assert_eq!(out1.len() + out2.len(), group.len());
    Ok((out1, out2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::DistanceMetric;
    use crate::trace::{
        Trace,
        TraceSet,
    };

    fn line_traces(offsets: &[f64]) -> TraceSet {
        TraceSet::new(
            offsets
                .iter()
                .map(|y| Trace::from_xy(&[(0., *y), (1., *y)]).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_too_small() {
        let traces = line_traces(&[0.]);
        let ids = traces.ids().collect::<Vec<_>>();
        let space = TraceSpace::new(&traces, &DistanceMetric::Average);

        assert_eq!(
            bisect_group(&space, &ids),
            Err(ClusteringError::GroupTooSmall { found: 1 })
        );
        assert_eq!(
            bisect_group(&space, &[]),
            Err(ClusteringError::GroupTooSmall { found: 0 })
        );
    }

    #[test]
    fn test_two_traces() {
        let traces = line_traces(&[0., 4.]);
        let ids = traces.ids().collect::<Vec<_>>();
        let space = TraceSpace::new(&traces, &DistanceMetric::Average);

        let (a, b) = bisect_group(&space, &ids).unwrap();
        assert_eq!(a, vec![ids[0]]);
        assert_eq!(b, vec![ids[1]]);
    }

    #[test]
    fn test_nearest_center_assignment() {
        let traces = line_traces(&[0., 1., 9., 10., 2., 8.]);
        let ids = traces.ids().collect::<Vec<_>>();
        let space = TraceSpace::new(&traces, &DistanceMetric::Frechet);

        let (a, b) = bisect_group(&space, &ids).unwrap();
        assert_eq!(a, vec![ids[0], ids[1], ids[4]]);
        assert_eq!(b, vec![ids[3], ids[2], ids[5]]);
    }

    #[test]
    fn test_ties_go_to_second_center() {
        // Offset 5 is exactly between the centers at 0 and 10.
        let traces = line_traces(&[0., 5., 10.]);
        let ids = traces.ids().collect::<Vec<_>>();
        let space = TraceSpace::new(&traces, &DistanceMetric::Maximum);

        let (a, b) = bisect_group(&space, &ids).unwrap();
        assert_eq!(a, vec![ids[0]]);
        assert_eq!(b, vec![ids[2], ids[1]]);
    }

    #[test]
    fn test_identical_traces_still_split() {
        let traces = line_traces(&[3., 3., 3.]);
        let ids = traces.ids().collect::<Vec<_>>();
        let space = TraceSpace::new(&traces, &DistanceMetric::Average);

        let (a, b) = bisect_group(&space, &ids).unwrap();
        assert_eq!(a, vec![ids[0]]);
        assert_eq!(b, vec![ids[1], ids[2]]);
    }
}
