//! Greedy divisive clustering of traces.
//!
//! Starting from one group holding every trace, the group with the largest
//! internal dissimilarity is repeatedly bisected until the requested number
//! of groups exists. Splits are never revisited.

pub mod bisect;
pub mod divisive;
pub mod search;

use crate::errors::{
    ClusteringError,
    Result,
};
use crate::metrics::TraceDistance;
use crate::trace::{
    ModeSequence,
    Trace,
    TraceId,
    TraceSet,
};

pub use bisect::bisect_group;
pub use divisive::{
    split_traces_by_tag,
    split_traces_into_groups,
    DivisiveSplitter,
};
pub use search::find_most_distant;

/// A trace set paired with the metric used to compare its members.
pub struct TraceSpace<'a, D: ?Sized> {
    traces: &'a TraceSet,
    metric: &'a D,
}

impl<'a, D> TraceSpace<'a, D>
where
    D: TraceDistance + Sync + ?Sized,
{
    pub fn new(
        traces: &'a TraceSet,
        metric: &'a D,
    ) -> Self {
        TraceSpace { traces, metric }
    }

    pub fn traces(&self) -> &'a TraceSet {
        self.traces
    }

    pub fn metric(&self) -> &'a D {
        self.metric
    }

    pub fn trace(
        &self,
        id: TraceId,
    ) -> &'a Trace {
        &self.traces[id]
    }

    #[inline]
    pub fn distance(
        &self,
        a: TraceId,
        b: TraceId,
    ) -> f64 {
        self.metric.distance(&self.traces[a], &self.traces[b])
    }

    /// Checks that every trace carries what the metric reads.
    pub fn validate(&self) -> Result<()> {
        if !self.metric.requires_modes() {
            return Ok(());
        }
        match self
            .traces
            .iter()
            .find(|(_, t)| t.mode_sequence().is_none())
        {
            Some((id, _)) => Err(ClusteringError::MissingModeSequence {
                metric: self.metric.name().to_string(),
                trace: id,
            }),
            None => Ok(()),
        }
    }
}

// Manual impls, a derive would require `D: Clone`.
impl<D: ?Sized> Clone for TraceSpace<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for TraceSpace<'_, D> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::DistanceMetric;

    #[test]
    fn test_validate_discrete_metric_needs_modes() {
        let traces = TraceSet::new(vec![
            Trace::from_xy(&[(0., 0.)]).unwrap().with_mode_sequence("a"),
            Trace::from_xy(&[(1., 0.)]).unwrap(),
        ]);
        let ids = traces.ids().collect::<Vec<_>>();

        let space = TraceSpace::new(&traces, &DistanceMetric::Lcss);
        assert_eq!(
            space.validate(),
            Err(ClusteringError::MissingModeSequence {
                metric: "lcss".into(),
                trace: ids[1],
            })
        );

        let space = TraceSpace::new(&traces, &DistanceMetric::Average);
        assert_eq!(space.validate(), Ok(()));
        assert_eq!(space.distance(ids[0], ids[1]), 1.);
    }
}
