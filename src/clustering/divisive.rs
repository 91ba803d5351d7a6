use log::{
    debug,
    info,
};
use rayon::prelude::*;
use serde::Serialize;

use crate::clustering::bisect::bisect_group;
use crate::clustering::search::find_most_distant;
use crate::clustering::TraceSpace;
use crate::errors::{
    ClusteringError,
    Result,
};
use crate::metrics::{
    DistanceMetric,
    TraceDistance,
};
use crate::trace::{
    TraceGroup,
    TraceId,
    TraceSet,
};
use crate::utils;

#[derive(Debug, Serialize)]
struct SplitSnapshot<'a> {
    metric: &'a str,
    split: usize,
    groups: &'a [TraceGroup],
}

/// Drives the top-down splitting of a trace set.
pub struct DivisiveSplitter<'a, D: ?Sized> {
    space: TraceSpace<'a, D>,
    show_progress: bool,
}

impl<'a, D> DivisiveSplitter<'a, D>
where
    D: TraceDistance + Sync + ?Sized,
{
    pub fn new(
        traces: &'a TraceSet,
        metric: &'a D,
    ) -> Self {
        DivisiveSplitter {
            space: TraceSpace::new(traces, metric),
            show_progress: false,
        }
    }

    pub fn with_progress(
        mut self,
        show_progress: bool,
    ) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn space(&self) -> &TraceSpace<'a, D> {
        &self.space
    }

    /// Largest distance between any member and its most distant in-group
    /// partner.
    pub fn intragroup_distance(
        &self,
        group: &[TraceId],
    ) -> f64 {
        group
            .par_iter()
            .map(|t| {
                let partner = find_most_distant(&self.space, *t, group);
                self.space.distance(*t, partner)
            })
            .reduce(|| f64::NEG_INFINITY, f64::max)
    }

    /// Index of the next group to bisect, `None` once every group is a
    /// singleton.
    ///
    /// Only splittable groups compete. The first one is the default and a
    /// later one has to be strictly more dissimilar to replace it.
    pub fn choose_group_to_split(
        &self,
        groups: &[TraceGroup],
    ) -> Option<(usize, f64)> {
        let mut chosen: Option<(usize, f64)> = None;
        for (idx, group) in groups.iter().enumerate() {
            if group.len() < 2 {
                continue;
            }
            let distance = self.intragroup_distance(group);
            match chosen {
                Some((_, highest)) if distance <= highest => {},
                _ => chosen = Some((idx, distance)),
            }
        }
        chosen
    }

    /// Splits the trace set into at most `num_groups` groups.
    ///
    /// Exactly `num_groups` come back unless there are fewer traces than
    /// that. Groups list trace handles only, look them up in the trace set.
    pub fn split(
        &self,
        num_groups: usize,
    ) -> Result<Vec<TraceGroup>> {
        if num_groups == 0 {
            return Err(ClusteringError::InvalidGroupCount {
                requested: num_groups,
            });
        }
        let traces = self.space.traces();
        if traces.is_empty() {
            return Err(ClusteringError::EmptyInput);
        }
        self.space.validate()?;

        let metric_name = self.space.metric().name();
        let mut timer = utils::ContextTimer::new(
            &format!("split_traces_into_groups::{}", metric_name),
            true,
            utils::LogLevel::DEBUG,
        );

        let target_splits = num_groups.min(traces.len()) - 1;
        let progbar = if self.show_progress {
            indicatif::ProgressBar::new(target_splits as u64)
        } else {
            indicatif::ProgressBar::hidden()
        };

        let mut groups: Vec<TraceGroup> = vec![traces.ids().collect()];
        let mut num_splits = 0;

        while groups.len() < num_groups {
            let (idx, distance) = match self.choose_group_to_split(&groups) {
                Some(x) => x,
                None => break,
            };

            let group = groups.remove(idx);
            debug!(
                "Splitting group {} ({} traces, intragroup distance {:.4})",
                idx,
                group.len(),
                distance
            );
            let (new1, new2) = bisect_group(&self.space, &group)?;
            groups.push(new1);
            groups.push(new2);

            num_splits += 1;
            progbar.inc(1);
            utils::maybe_save_json_if_debugging(
                &SplitSnapshot {
                    metric: metric_name,
                    split: num_splits,
                    groups: &groups,
                },
                &format!("split_{}_{}", metric_name, num_splits),
                false,
            );
        }
        progbar.finish_and_clear();

        timer.stop(true);
        info!(
            "Split {} traces into {} groups by {}",
            traces.len(),
            groups.len(),
            metric_name
        );
        Ok(groups)
    }
}

/// Splits `traces` into at most `num_groups` groups of mutually similar
/// traces under `metric`.
pub fn split_traces_into_groups<D>(
    traces: &TraceSet,
    metric: &D,
    num_groups: usize,
) -> Result<Vec<TraceGroup>>
where
    D: TraceDistance + Sync + ?Sized,
{
    DivisiveSplitter::new(traces, metric).split(num_groups)
}

/// Same as [`split_traces_into_groups`], picking the metric by its tag.
///
/// An unknown tag fails before any distance is computed.
pub fn split_traces_by_tag(
    traces: &TraceSet,
    metric_tag: &str,
    num_groups: usize,
) -> Result<Vec<TraceGroup>> {
    let metric: DistanceMetric = metric_tag.parse()?;
    split_traces_into_groups(traces, &metric, num_groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    fn line_traces(offsets: &[f64]) -> TraceSet {
        TraceSet::new(
            offsets
                .iter()
                .map(|y| Trace::from_xy(&[(0., *y), (1., *y)]).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_intragroup_distance() {
        let traces = line_traces(&[0., 2., 7.]);
        let ids = traces.ids().collect::<Vec<_>>();
        let splitter = DivisiveSplitter::new(&traces, &DistanceMetric::Frechet);

        assert_eq!(splitter.intragroup_distance(&ids), 7.);
        assert_eq!(splitter.intragroup_distance(&ids[..2]), 2.);
        assert_eq!(splitter.intragroup_distance(&ids[..1]), 0.);
    }

    #[test]
    fn test_choose_most_dissimilar_group() {
        let traces = line_traces(&[0., 1., 10., 30., 50.]);
        let ids = traces.ids().collect::<Vec<_>>();
        let splitter = DivisiveSplitter::new(&traces, &DistanceMetric::Frechet);

        let groups = vec![vec![ids[0], ids[1]], vec![ids[2]], vec![ids[3], ids[4]]];
        assert_eq!(splitter.choose_group_to_split(&groups), Some((2, 20.)));

        let singletons = vec![vec![ids[0]], vec![ids[1]]];
        assert_eq!(splitter.choose_group_to_split(&singletons), None);
    }

    #[test]
    fn test_choose_skips_singletons_on_zero_distance() {
        // Identical traces have zero spread, the first splittable group wins.
        let traces = line_traces(&[1., 1., 1.]);
        let ids = traces.ids().collect::<Vec<_>>();
        let splitter = DivisiveSplitter::new(&traces, &DistanceMetric::Average);

        let groups = vec![vec![ids[0]], vec![ids[1], ids[2]]];
        assert_eq!(splitter.choose_group_to_split(&groups), Some((1, 0.)));
    }

    #[test]
    fn test_choose_skips_singletons_with_self_distance() {
        // Under lcss a lone "a" is 1.0 away from itself, more than the pair's 1/3.
        let traces = TraceSet::new(
            ["a", "a,b,c", "a,b,c"]
                .iter()
                .map(|m| {
                    Trace::from_xy(&[(0., 0.)])
                        .unwrap()
                        .with_mode_sequence(*m)
                })
                .collect(),
        );
        let ids = traces.ids().collect::<Vec<_>>();
        let splitter = DivisiveSplitter::new(&traces, &DistanceMetric::Lcss);

        assert_eq!(splitter.intragroup_distance(&ids[..1]), 1.);
        let groups = vec![vec![ids[0]], vec![ids[1], ids[2]]];
        assert_eq!(splitter.choose_group_to_split(&groups), Some((1, 1. / 3.)));

        let split = splitter.split(3).unwrap();
        assert_eq!(split.len(), 3);
        assert!(split.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_split_to_requested_count() {
        let traces = line_traces(&[0., 1., 10., 11., 50., 51.]);
        let ids = traces.ids().collect::<Vec<_>>();

        let groups = split_traces_into_groups(&traces, &DistanceMetric::Average, 3).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], vec![ids[5], ids[4]]);
        assert_eq!(groups[1], vec![ids[0], ids[1]]);
        assert_eq!(groups[2], vec![ids[3], ids[2]]);
    }

    #[test]
    fn test_split_stops_at_singletons() {
        let traces = line_traces(&[0., 5.]);
        let groups = split_traces_into_groups(&traces, &DistanceMetric::Hausdorff, 6).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_one_group_is_everything() {
        let traces = line_traces(&[0., 5., 9.]);
        let groups = split_traces_into_groups(&traces, &DistanceMetric::Area, 1).unwrap();
        assert_eq!(groups, vec![traces.ids().collect::<Vec<_>>()]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let empty = TraceSet::default();
        assert_eq!(
            split_traces_into_groups(&empty, &DistanceMetric::Average, 2),
            Err(ClusteringError::EmptyInput)
        );

        let traces = line_traces(&[0., 5.]);
        assert_eq!(
            split_traces_into_groups(&traces, &DistanceMetric::Average, 0),
            Err(ClusteringError::InvalidGroupCount { requested: 0 })
        );
        assert_eq!(
            split_traces_by_tag(&traces, "bogus", 2),
            Err(ClusteringError::UnknownMetric("bogus".into()))
        );
    }
}
