//! Reading recorded traces from disk.

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use log::{
    info,
    warn,
};
use serde::Deserialize;

use crate::trace::{
    Point2D,
    Trace,
    TraceSet,
};
use crate::utils;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModesField {
    Joined(String),
    Labels(Vec<String>),
}

impl ModesField {
    fn into_joined(self) -> String {
        match self {
            ModesField::Joined(s) => s,
            ModesField::Labels(labels) => labels.join(","),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTrace {
    Points(Vec<Point2D>),
    Full {
        points: Vec<Point2D>,
        #[serde(default)]
        modes: Option<ModesField>,
    },
}

impl RawTrace {
    fn into_trace(self) -> crate::errors::Result<Trace> {
        match self {
            RawTrace::Points(points) => Trace::new(points),
            RawTrace::Full { points, modes } => {
                let trace = Trace::new(points)?;
                Ok(match modes {
                    Some(modes) => trace.with_mode_sequence(modes.into_joined()),
                    None => trace,
                })
            },
        }
    }
}

/// Parses a json array of traces.
///
/// Each item is either a bare `[[x, y], ...]` point array or an object
/// with `points` and optional `modes` (a comma-joined string or a list of
/// labels).
pub fn parse_traces_json(json: &str) -> Result<TraceSet, Box<dyn Error>> {
    let raw: Vec<RawTrace> = serde_json::from_str(json)?;
    let traces = raw
        .into_iter()
        .map(RawTrace::into_trace)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TraceSet::new(traces))
}

pub fn read_traces_json(path: impl AsRef<Path>) -> Result<TraceSet, Box<dyn Error>> {
    let json = std::fs::read_to_string(path)?;
    parse_traces_json(&json)
}

#[derive(Debug, Deserialize)]
struct CsvPointRow {
    trace: String,
    x: f64,
    y: f64,
}

/// Reads long-format csv with a `trace,x,y` header.
///
/// Rows are grouped by the `trace` column, traces are kept in order of
/// first appearance and points in row order.
pub fn read_traces_csv<R: std::io::Read>(reader: R) -> Result<TraceSet, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut points: Vec<Vec<Point2D>> = Vec::new();

    for row in rdr.deserialize() {
        let row: CsvPointRow = row?;
        let idx = match order.get(&row.trace) {
            Some(idx) => *idx,
            None => {
                order.insert(row.trace.clone(), points.len());
                points.push(Vec::new());
                points.len() - 1
            },
        };
        points[idx].push(Point2D::new(row.x, row.y));
    }

    let traces = points
        .into_iter()
        .map(Trace::new)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TraceSet::new(traces))
}

/// Loads traces, picking the format from the file extension.
pub fn read_traces(path: impl AsRef<Path>) -> Result<TraceSet, Box<dyn Error>> {
    let path = path.as_ref();
    let mut timer = utils::ContextTimer::new("read_traces", true, utils::LogLevel::INFO);

    let traces = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_traces_csv(std::fs::File::open(path)?)?,
        Some("json") => read_traces_json(path)?,
        other => {
            warn!("Unknown extension {:?}, reading {:?} as json", other, path);
            read_traces_json(path)?
        },
    };
    timer.stop(true);

    let lengths = traces
        .traces()
        .iter()
        .map(|t| t.len() as f64)
        .collect::<Vec<_>>();
    let stats = utils::get_stats(&lengths);
    info!(
        "{} traces, average length {:.1} (min={}, max={})",
        traces.len(),
        stats.mean,
        stats.min.unwrap_or(0.),
        stats.max.unwrap_or(0.)
    );

    Ok(traces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::ModeSequence;

    #[test]
    fn test_parse_bare_point_arrays() {
        let traces = parse_traces_json("[[[0, 0], [1, 0]], [[5, 5]]]").unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces.traces()[0].points()[1], Point2D::new(1., 0.));
        assert_eq!(traces.traces()[1].len(), 1);
        assert_eq!(traces.traces()[1].mode_sequence(), None);
    }

    #[test]
    fn test_parse_objects_with_modes() {
        let json = r#"[
            {"points": [[0, 0]], "modes": "a,b"},
            {"points": [[1, 1]], "modes": ["a", "c"]},
            {"points": [[2, 2]]}
        ]"#;
        let traces = parse_traces_json(json).unwrap();
        assert_eq!(traces.traces()[0].mode_sequence(), Some("a,b"));
        assert_eq!(traces.traces()[1].mode_sequence(), Some("a,c"));
        assert_eq!(traces.traces()[2].mode_sequence(), None);
    }

    #[test]
    fn test_empty_trace_is_an_error() {
        assert!(parse_traces_json("[[[0, 0]], []]").is_err());
    }

    #[test]
    fn test_read_csv_groups_rows() {
        let data = "trace,x,y\nb,0,0\na,5,5\nb,1,0\na,6,5\n";
        let traces = read_traces_csv(data.as_bytes()).unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(
            traces.traces()[0].points(),
            &[Point2D::new(0., 0.), Point2D::new(1., 0.)]
        );
        assert_eq!(
            traces.traces()[1].points(),
            &[Point2D::new(5., 5.), Point2D::new(6., 5.)]
        );
    }
}
