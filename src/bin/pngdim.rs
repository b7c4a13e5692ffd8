//! PNG dimension lister
//!
//! Usage:
//!   cargo run --bin pngdim -- path/to/pngs subset.txt
//!
//! Reads one image name per line from the subset file (without `.png`) and
//! writes `name width height` lines to `filename_width_height.txt`.

use anyhow::Result;
use clap::{Parser, ValueHint};
use log::info;
use std::path::{Path, PathBuf};

use heatmap_viz::cli::init_logging;
use heatmap_viz::pngdim::{OUTPUT_FILE, list_dimensions, write_listing};

#[derive(Parser, Debug)]
#[command(name = "pngdim", about = "List width and height of a subset of PNG images")]
struct Args {
    /// Directory holding `<name>.png` files
    #[arg(value_hint = ValueHint::DirPath)]
    png_dir: PathBuf,
    /// File with one image name per line
    #[arg(value_hint = ValueHint::FilePath)]
    subset: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let sizes = list_dimensions(&args.png_dir, &args.subset)?;
    write_listing(&sizes, Path::new(OUTPUT_FILE))?;
    info!("Wrote {} entries to {}", sizes.len(), OUTPUT_FILE);
    Ok(())
}
