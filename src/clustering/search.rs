use log::trace;

use crate::clustering::TraceSpace;
use crate::metrics::TraceDistance;
use crate::trace::TraceId;

/// The candidate farthest from `reference`.
///
/// The reference itself is never picked, and only a strictly larger
/// distance replaces the current best, so the first maximum wins. When no
/// other candidate is farther than zero the reference is returned, callers
/// always get some trace back.
pub fn find_most_distant<D>(
    space: &TraceSpace<'_, D>,
    reference: TraceId,
    candidates: &[TraceId],
) -> TraceId
where
    D: TraceDistance + Sync + ?Sized,
{
    let mut largest_distance = 0.;
    let mut most_distant = reference;

    for &candidate in candidates {
        if candidate == reference {
            continue;
        }
        let distance = space.distance(reference, candidate);
        if distance > largest_distance {
            largest_distance = distance;
            most_distant = candidate;
        }
    }

    trace!(
        "Most distant from {} is {} ({:.4})",
        reference,
        most_distant,
        largest_distance
    );
    most_distant
}
