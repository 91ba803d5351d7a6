use std::fmt;
use std::ops::Index;

use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::{
    ClusteringError,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Point2D { x, y }
    }

    /// Plain euclidean distance, `sqrt(dx^2 + dy^2)`.
    #[inline]
    pub fn distance(
        &self,
        other: &Point2D,
    ) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(value: [f64; 2]) -> Self {
        Point2D {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(value: (f64, f64)) -> Self {
        Point2D {
            x: value.0,
            y: value.1,
        }
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(value: Point2D) -> Self {
        [value.x, value.y]
    }
}

/// Access to the discrete mode labels of a trace.
///
/// Only the discrete metrics (`lcss` and `edit_distance`) ever look at this,
/// the rest of the crate works on points alone.
pub trait ModeSequence {
    /// The raw mode sequence, labels joined by commas.
    fn mode_sequence(&self) -> Option<&str>;
}

/// One simulation run, an ordered and non-empty sequence of 2-D points.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    points: Vec<Point2D>,
    modes: Option<String>,
}

impl Trace {
    pub fn new(points: Vec<Point2D>) -> Result<Self> {
        if points.is_empty() {
            return Err(ClusteringError::EmptyTrace);
        }
        Ok(Trace {
            points,
            modes: None,
        })
    }

    pub fn from_xy(points: &[(f64, f64)]) -> Result<Self> {
        Trace::new(points.iter().map(|p| Point2D::from(*p)).collect())
    }

    pub fn with_mode_sequence(
        mut self,
        modes: impl Into<String>,
    ) -> Self {
        self.modes = Some(modes.into());
        self
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ModeSequence for Trace {
    fn mode_sequence(&self) -> Option<&str> {
        self.modes.as_deref()
    }
}

/// Opaque handle to a trace inside a [`TraceSet`].
///
/// Two traces with the same points are still different traces, equality
/// of handles is the only notion of "same trace" used while clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(usize);

impl TraceId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered collection of trace handles, no duplicates.
pub type TraceGroup = Vec<TraceId>;

/// Fixed arena of traces, the handles it gives out stay valid for its
/// whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct TraceSet {
    traces: Vec<Trace>,
}

impl TraceSet {
    pub fn new(traces: Vec<Trace>) -> Self {
        TraceSet { traces }
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn get(
        &self,
        id: TraceId,
    ) -> Option<&Trace> {
        self.traces.get(id.0)
    }

    /// Handles of every trace, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = TraceId> + '_ {
        (0..self.traces.len()).map(TraceId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraceId, &Trace)> + '_ {
        self.traces
            .iter()
            .enumerate()
            .map(|(i, t)| (TraceId(i), t))
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }
}

impl From<Vec<Trace>> for TraceSet {
    fn from(traces: Vec<Trace>) -> Self {
        TraceSet::new(traces)
    }
}

impl Index<TraceId> for TraceSet {
    type Output = Trace;

    fn index(
        &self,
        id: TraceId,
    ) -> &Trace {
        &self.traces[id.0]
    }
}
