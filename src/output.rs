//! Writing clustering results.

use std::error::Error;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use crate::metrics::DistanceMetric;
use crate::trace::{
    TraceGroup,
    TraceSet,
};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AssignmentRow {
    pub trace: usize,
    pub group: usize,
    pub num_points: usize,
}

/// One row per trace, in group order.
pub fn assignment_rows(
    groups: &[TraceGroup],
    traces: &TraceSet,
) -> Vec<AssignmentRow> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(group_idx, group)| {
            group.iter().map(move |id| AssignmentRow {
                trace: id.index(),
                group: group_idx,
                num_points: traces[*id].len(),
            })
        })
        .collect()
}

pub fn write_assignments_csv<W: std::io::Write>(
    groups: &[TraceGroup],
    traces: &TraceSet,
    writer: W,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in assignment_rows(groups, traces) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_assignments_csv_path(
    groups: &[TraceGroup],
    traces: &TraceSet,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path)?;
    write_assignments_csv(groups, traces, file)
}

/// Outcome of one (metric, group count) run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub metric: DistanceMetric,
    pub requested_groups: usize,
    pub group_sizes: Vec<usize>,
}

impl RunSummary {
    pub fn new(
        metric: DistanceMetric,
        requested_groups: usize,
        groups: &[TraceGroup],
    ) -> Self {
        RunSummary {
            metric,
            requested_groups,
            group_sizes: groups.iter().map(|g| g.len()).collect(),
        }
    }
}

pub fn write_summary_json(
    summaries: &[RunSummary],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(summaries)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    fn sample() -> (TraceSet, Vec<TraceGroup>) {
        let traces = TraceSet::new(vec![
            Trace::from_xy(&[(0., 0.)]).unwrap(),
            Trace::from_xy(&[(0., 0.), (1., 1.)]).unwrap(),
            Trace::from_xy(&[(9., 9.), (9., 8.), (9., 7.)]).unwrap(),
        ]);
        let ids = traces.ids().collect::<Vec<_>>();
        let groups = vec![vec![ids[2]], vec![ids[0], ids[1]]];
        (traces, groups)
    }

    #[test]
    fn test_assignment_rows() {
        let (traces, groups) = sample();
        let rows = assignment_rows(&groups, &traces);
        assert_eq!(
            rows,
            vec![
                AssignmentRow {
                    trace: 2,
                    group: 0,
                    num_points: 3
                },
                AssignmentRow {
                    trace: 0,
                    group: 1,
                    num_points: 1
                },
                AssignmentRow {
                    trace: 1,
                    group: 1,
                    num_points: 2
                },
            ]
        );
    }

    #[test]
    fn test_write_csv() {
        let (traces, groups) = sample();
        let mut buf = Vec::new();
        write_assignments_csv(&groups, &traces, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "trace,group,num_points\n2,0,3\n0,1,1\n1,1,2\n");
    }

    #[test]
    fn test_summary() {
        let (_, groups) = sample();
        let summary = RunSummary::new(DistanceMetric::EditDistance, 4, &groups);
        assert_eq!(summary.group_sizes, vec![1, 2]);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"metric\":\"edit_distance\""));
    }
}
