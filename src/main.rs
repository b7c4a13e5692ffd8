//! Heatmap tool
//!
//! Renders one smoothed, zero-centred heatmap per point batch file.
//!
//! Usage:
//!   cargo run --bin heatmap -- weights.txt img01.clst img02.feat
//!   cargo run --bin heatmap -- --settings my_settings.json weights.txt img01.clst
//!
//! Each output lands next to its input as `<batchfile>.png`.

use std::process::ExitCode;

use heatmap_viz::cli;

fn main() -> ExitCode {
    cli::init_logging();
    cli::run(std::env::args_os())
}
