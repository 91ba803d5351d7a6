use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::metrics::DistanceMetric;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClusteringConfig {
    pub metrics: Vec<DistanceMetric>,
    pub num_groups: Vec<usize>,
    pub show_progress: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        ClusteringConfig {
            metrics: vec![
                DistanceMetric::Hausdorff,
                DistanceMetric::Average,
                DistanceMetric::Area,
                DistanceMetric::Frechet,
            ],
            num_groups: vec![2, 4, 6],
            show_progress: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub file_prefix: String,
    pub write_assignments_csv: bool,
    pub summary_json: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            file_prefix: "traces".into(),
            write_assignments_csv: true,
            summary_json: Some("summary.json".into()),
        }
    }
}

impl OutputConfig {
    /// `{prefix}_{num_groups}_{metric}.csv` inside `out_dir`.
    pub fn assignments_path(
        &self,
        out_dir: &Path,
        metric: DistanceMetric,
        num_groups: usize,
    ) -> PathBuf {
        out_dir.join(format!(
            "{}_{}_{}.csv",
            self.file_prefix,
            num_groups,
            metric.tag()
        ))
    }

    pub fn summary_path(
        &self,
        out_dir: &Path,
    ) -> Option<PathBuf> {
        self.summary_json.as_ref().map(|p| out_dir.join(p))
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct Config {
    pub clustering_config: ClusteringConfig,
    pub output_config: OutputConfig,
}

impl Config {
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_str = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
