use thiserror::Error;

use crate::trace::TraceId;

/// Errors raised by the distance and clustering core.
///
/// All of these are deterministic configuration or precondition
/// violations, nothing here is worth retrying.
#[derive(Debug, Error, PartialEq)]
pub enum ClusteringError {
    /// The metric tag is not one of the supported metrics.
    #[error("unknown distance metric: {0:?}")]
    UnknownMetric(String),

    /// No traces were supplied.
    #[error("cannot split an empty trace set")]
    EmptyInput,

    /// The requested number of groups is zero.
    #[error("invalid group count: requested {requested}, need at least 1")]
    InvalidGroupCount { requested: usize },

    /// A group handed to the bisector has fewer than two traces.
    #[error("cannot split group of fewer than two traces (found {found})")]
    GroupTooSmall { found: usize },

    /// A discrete metric was selected but a trace carries no mode sequence.
    #[error("metric {metric} needs mode sequences but trace {trace} has none")]
    MissingModeSequence { metric: String, trace: TraceId },

    /// A trace was built without any point.
    #[error("a trace needs at least one point")]
    EmptyTrace,
}

pub type Result<T> = std::result::Result<T, ClusteringError>;
