extern crate log;
extern crate pretty_env_logger;

use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;
use log::{
    info,
    warn,
};

use tracesplit::config::Config;
use tracesplit::output::{
    write_assignments_csv_path,
    write_summary_json,
    RunSummary,
};
use tracesplit::visualization::RerunPlottable;
use tracesplit::{
    loading,
    visualization,
    DistanceMetric,
    DivisiveSplitter,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    config: String,
    #[arg(short, long, default_value = "tracesplit_output")]
    output_dir: String,
    #[arg(long, action)]
    write_template: bool,
    /// Distance metric to use, repeat for several. Overrides the config.
    #[arg(short, long)]
    metric: Vec<String>,
    /// Trace file to use (.json or .csv)
    files: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.write_template {
        let config_str = Config::default().to_toml()?;

        let out_path = args.config;
        if fs::metadata(&out_path).is_ok() {
            return Err(format!("File already exists: {}", out_path).into());
        }
        fs::write(&out_path, config_str)?;
        println!("Wrote default config to {}", out_path);
        return Ok(());
    }

    let mut config = Config::from_toml(&args.config)?;

    // Unknown tags fail here, before anything is loaded.
    if !args.metric.is_empty() {
        config.clustering_config.metrics = args
            .metric
            .iter()
            .map(|m| m.parse::<DistanceMetric>())
            .collect::<Result<Vec<_>, _>>()?;
    }

    pretty_env_logger::init();

    let mut rec: Option<rerun::RecordingStream> = None;
    if cfg!(feature = "viz") {
        rec = Some(visualization::setup_recorder()?);
    }

    if args.files.len() != 1 {
        return Err(format!("Expected exactly one trace file, got {}", args.files.len()).into());
    }
    let traces = loading::read_traces(&args.files[0])?;

    let out_path_dir = Path::new(&args.output_dir);
    if !out_path_dir.exists() {
        fs::create_dir_all(out_path_dir)?;
    }

    let clustering_config = &config.clustering_config;
    let output_config = &config.output_config;
    let mut summaries = Vec::new();

    for metric in clustering_config.metrics.iter() {
        info!("Splitting by {}...", metric);
        let splitter = DivisiveSplitter::new(&traces, metric)
            .with_progress(clustering_config.show_progress);

        for &num_groups in clustering_config.num_groups.iter() {
            info!("num_groups={}...", num_groups);
            let groups = splitter.split(num_groups)?;

            if output_config.write_assignments_csv {
                let out_path = output_config.assignments_path(out_path_dir, *metric, num_groups);
                info!("Saving assignments in {:?}", out_path);
                if let Err(e) = write_assignments_csv_path(&groups, &traces, &out_path) {
                    warn!("Error writing assignments: {:?}", e);
                }
            }

            if let Some(stream) = rec.as_mut() {
                let out = groups.plot(
                    stream,
                    format!("{}/{}", output_config.file_prefix, metric),
                    Some(num_groups as i64),
                    &traces,
                );
                if let Err(e) = out {
                    warn!("Error logging groups to rerun: {:?}", e);
                }
            }

            summaries.push(RunSummary::new(*metric, num_groups, &groups));
        }
    }

    if let Some(summary_path) = output_config.summary_path(out_path_dir) {
        write_summary_json(&summaries, summary_path)?;
    }
    Ok(())
}
