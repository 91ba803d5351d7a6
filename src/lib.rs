//! Groups recorded 2-D trajectories into clusters of mutually similar traces.
//!
//! The core is the set of trace [`metrics`] and the greedy divisive
//! [`clustering`] built on top of them. Everything else reads traces in and
//! writes groups out.

pub mod clustering;
pub mod config;
pub mod errors;
pub mod loading;
pub mod metrics;
pub mod output;
pub mod trace;
pub mod utils;
pub mod visualization;

pub use clustering::{
    split_traces_by_tag,
    split_traces_into_groups,
    DivisiveSplitter,
};
pub use errors::ClusteringError;
pub use metrics::{
    DistanceMetric,
    TraceDistance,
};
pub use trace::{
    ModeSequence,
    Point2D,
    Trace,
    TraceGroup,
    TraceId,
    TraceSet,
};
