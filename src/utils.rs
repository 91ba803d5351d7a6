use std::error::Error;
use std::path::{
    Path,
    PathBuf,
};
use std::time::{
    Duration,
    Instant,
};

use log::{
    debug,
    info,
    trace,
    warn,
};

pub struct ContextTimer {
    start: Instant,
    name: String,
    level: LogLevel,
    pub cumtime: Duration,
}

#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    INFO,
    DEBUG,
    TRACE,
}

impl LogLevel {
    fn log(
        &self,
        msg: std::fmt::Arguments,
    ) {
        match self {
            LogLevel::INFO => info!("{}", msg),
            LogLevel::DEBUG => debug!("{}", msg),
            LogLevel::TRACE => trace!("{}", msg),
        }
    }
}

impl ContextTimer {
    pub fn new(
        name: &str,
        report_start: bool,
        level: LogLevel,
    ) -> ContextTimer {
        let out = ContextTimer {
            start: Instant::now(),
            name: name.to_string(),
            level,
            cumtime: Duration::new(0, 0),
        };
        if report_start {
            out.level.log(format_args!("Started: '{}'", out.name));
        }
        out
    }

    pub fn stop(
        &mut self,
        report: bool,
    ) -> Duration {
        let duration = self.start.elapsed();
        self.cumtime += duration;
        if report {
            self.report();
        }
        duration
    }

    pub fn report(&self) {
        self.level.log(format_args!(
            "Time elapsed in '{}' is: {:.02}s",
            self.name,
            self.cumtime.as_secs_f64()
        ));
    }
}

/// Mean and population variance of a stream of values, without storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct RollingSDCalculator {
    n: u64,
    mean: f64,
    m2: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl RollingSDCalculator {
    pub fn add(
        &mut self,
        x: f64,
    ) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);

        self.min = Some(self.min.map_or(x, |min| min.min(x)));
        self.max = Some(self.max.map_or(x, |max| max.max(x)));
    }

    pub fn get_mean(&self) -> f64 {
        self.mean
    }

    pub fn get_variance(&self) -> f64 {
        if self.n == 0 {
            return 0.;
        }
        self.m2 / self.n as f64
    }

    pub fn get_sd(&self) -> f64 {
        self.get_variance().sqrt()
    }

    pub fn get_min(&self) -> Option<f64> {
        self.min
    }

    pub fn get_max(&self) -> Option<f64> {
        self.max
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Stats {
    pub mean: f64,
    pub sd: f64,
    pub n: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

pub fn get_stats(data: &[f64]) -> Stats {
    let mut sd_calc = RollingSDCalculator::default();
    for x in data.iter() {
        sd_calc.add(*x);
    }
    Stats {
        mean: sd_calc.get_mean(),
        sd: sd_calc.get_sd(),
        n: sd_calc.n,
        min: sd_calc.get_min(),
        max: sd_calc.get_max(),
    }
}

/// Serializes `obj` to json if debug assertions are enabled and the env
/// variable `TRACESPLIT_DEBUG_JSON_FREQUENCY` is set, saving roughly one
/// call in every `frequency` (or every call when `force` is set).
///
/// Files land in `TRACESPLIT_DEBUG_JSON_PATH` (created if missing, current
/// directory if unset) as `{name}.json`. Returns whether a file was written,
/// failures are logged and otherwise ignored.
pub fn maybe_save_json_if_debugging<T>(
    obj: &T,
    name: &str,
    force: bool,
) -> bool
where
    T: serde::Serialize,
{
    if !cfg!(debug_assertions) {
        return false;
    }
    let freq = match std::env::var("TRACESPLIT_DEBUG_JSON_FREQUENCY") {
        Ok(freq) => freq,
        Err(_) => return false,
    };
    let freq = match freq.parse::<usize>() {
        Ok(freq) => freq,
        Err(e) => {
            warn!("Invalid TRACESPLIT_DEBUG_JSON_FREQUENCY {:?}: {}", freq, e);
            return false;
        },
    };
    if !force && (freq == 0 || rand::random::<usize>() % freq != 0) {
        return false;
    }

    match save_debug_json(obj, name) {
        Ok(path) => {
            info!("Saved debug json to {:?}", path);
            true
        },
        Err(e) => {
            warn!("Error saving debug json {}: {}", name, e);
            false
        },
    }
}

fn save_debug_json<T: serde::Serialize>(
    obj: &T,
    name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let dir = match std::env::var("TRACESPLIT_DEBUG_JSON_PATH") {
        Ok(path) => {
            let dir = PathBuf::from(path);
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
            dir
        },
        Err(_) => {
            warn!("TRACESPLIT_DEBUG_JSON_PATH not set, saving to current directory");
            Path::new(".").to_path_buf()
        },
    };
    let path = dir.join(format!("{}.json", name));
    std::fs::write(&path, serde_json::to_string_pretty(obj)?)?;
    Ok(path)
}
