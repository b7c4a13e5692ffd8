//! Command line entry point for the heatmap tool
//!
//! Usage:
//!   heatmap weights.txt image1.clst [image2.feat ...]
//!   heatmap --settings config/heatmap_settings.json weights.txt image1.clst

use clap::Parser;
use clap::ValueHint;
use log::{error, info};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::builder::{BatchReport, HeatmapBuilder};
use crate::error::Result;
use crate::settings::HeatmapSettings;
use crate::weights::WeightTable;

#[derive(Parser, Debug)]
#[command(
    name = "heatmap",
    about = "Render smoothed heatmaps from weighted point clusters"
)]
struct HeatmapArgs {
    /// JSON settings file (defaults to config/heatmap_settings.json if present)
    #[arg(long, value_hint = ValueHint::FilePath)]
    settings: Option<PathBuf>,

    /// Weight file: one real weight per cluster label
    #[arg(value_hint = ValueHint::FilePath)]
    weight_file: PathBuf,

    /// Point batch files (text table for the text extension, binary otherwise)
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    batch_files: Vec<PathBuf>,
}

/// Resolved arguments for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub weight_path: PathBuf,
    pub batch_paths: Vec<PathBuf>,
    pub settings_path: Option<PathBuf>,
}

impl RunConfig {
    /// Parse a full argv (program name first)
    pub fn from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = HeatmapArgs::try_parse_from(args)?;
        Ok(Self {
            weight_path: args.weight_file,
            batch_paths: args.batch_files,
            settings_path: args.settings,
        })
    }
}

/// Initialise `env_logger` with an `info` default
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Load settings and weights, then render every batch
pub fn execute(config: &RunConfig) -> Result<BatchReport> {
    let settings = match &config.settings_path {
        Some(path) => HeatmapSettings::from_file(path)?,
        None => HeatmapSettings::load()?,
    };
    let weights = WeightTable::load(&config.weight_path)?;
    info!(
        "Loaded {} weights from {}",
        weights.len(),
        config.weight_path.display()
    );

    let builder = HeatmapBuilder::new(weights, settings);
    let report = builder.run(&config.batch_paths);
    info!(
        "Wrote {} of {} heatmaps",
        report.written.len(),
        config.batch_paths.len()
    );
    Ok(report)
}

/// Run the tool on a full argv. Any skipped batch makes the exit code non-zero.
pub fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = match RunConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match execute(&config) {
        Ok(report) if report.all_written() => ExitCode::SUCCESS,
        Ok(report) => {
            for (path, err) in &report.skipped {
                eprintln!("{}: {}", path.display(), err);
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
