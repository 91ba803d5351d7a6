//! Dissimilarity measures between two traces.
//!
//! Every metric implements [`TraceDistance`]. [`DistanceMetric`] is the
//! tagged variant picked from configuration, it dispatches to the
//! per-metric implementations so the clustering code never has to know
//! which one is active.

pub mod area;
pub mod frechet;
pub mod modes;
pub mod pointwise;

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::ClusteringError;
use crate::trace::Trace;

/// A dissimilarity score between two traces.
///
/// Implementations are pure functions of their inputs. They are not
/// required to be symmetric or to be zero on self comparison
/// (see [`modes::Lcss`]).
pub trait TraceDistance {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64;

    /// Whether the metric reads mode sequences instead of points.
    fn requires_modes(&self) -> bool {
        false
    }

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    Average,
    Maximum,
    Hausdorff,
    Area,
    Frechet,
    Lcss,
    EditDistance,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 7] = [
        DistanceMetric::Average,
        DistanceMetric::Maximum,
        DistanceMetric::Hausdorff,
        DistanceMetric::Area,
        DistanceMetric::Frechet,
        DistanceMetric::Lcss,
        DistanceMetric::EditDistance,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            DistanceMetric::Average => "average",
            DistanceMetric::Maximum => "maximum",
            DistanceMetric::Hausdorff => "hausdorff",
            DistanceMetric::Area => "area",
            DistanceMetric::Frechet => "frechet",
            DistanceMetric::Lcss => "lcss",
            DistanceMetric::EditDistance => "edit_distance",
        }
    }

    fn implementation(&self) -> &'static (dyn TraceDistance + Sync) {
        match self {
            DistanceMetric::Average => &pointwise::Average,
            DistanceMetric::Maximum => &pointwise::Maximum,
            DistanceMetric::Hausdorff => &pointwise::Hausdorff,
            DistanceMetric::Area => &area::Area,
            DistanceMetric::Frechet => &frechet::Frechet,
            DistanceMetric::Lcss => &modes::Lcss,
            DistanceMetric::EditDistance => &modes::EditDistance,
        }
    }
}

impl TraceDistance for DistanceMetric {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64 {
        self.implementation().distance(a, b)
    }

    fn requires_modes(&self) -> bool {
        self.implementation().requires_modes()
    }

    fn name(&self) -> &str {
        self.tag()
    }
}

impl FromStr for DistanceMetric {
    type Err = ClusteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceMetric::ALL
            .iter()
            .find(|m| m.tag() == s)
            .copied()
            .ok_or_else(|| ClusteringError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for metric in DistanceMetric::ALL {
            assert_eq!(metric.tag().parse::<DistanceMetric>(), Ok(metric));
            assert_eq!(metric.name(), metric.tag());
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            "bogus".parse::<DistanceMetric>(),
            Err(ClusteringError::UnknownMetric("bogus".into()))
        );
        // Tags are matched exactly.
        assert!("Average".parse::<DistanceMetric>().is_err());
    }

    #[test]
    fn test_serde_tags_match() {
        for metric in DistanceMetric::ALL {
            let json = serde_json::to_string(&metric).unwrap();
            assert_eq!(json, format!("\"{}\"", metric.tag()));
        }
        assert!(serde_json::from_str::<DistanceMetric>("\"bogus\"").is_err());
    }

    #[test]
    fn test_only_discrete_metrics_need_modes() {
        let discrete = DistanceMetric::ALL
            .iter()
            .filter(|m| m.requires_modes())
            .copied()
            .collect::<Vec<_>>();
        assert_eq!(
            discrete,
            vec![DistanceMetric::Lcss, DistanceMetric::EditDistance]
        );
    }
}
