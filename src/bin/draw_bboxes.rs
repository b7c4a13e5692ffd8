//! Draw bounding box outlines onto an image
//!
//! Usage:
//!   cargo run --bin draw_bboxes -- input.png output.png x1 y1 x2 y2 [x1 y1 x2 y2 ...]

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use log::info;
use std::path::PathBuf;

use heatmap_viz::boxes::{BoundingBox, OUTLINE_COLOR, draw_outlines, open_image, save_image};
use heatmap_viz::cli::init_logging;

#[derive(Parser, Debug)]
#[command(name = "draw_bboxes", about = "Draw rectangle outlines onto an image")]
struct Args {
    /// Image to draw on
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Where to save the result
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,
    /// Corner coordinates, four per box: x1 y1 x2 y2
    #[arg(required = true, num_args = 4.., allow_negative_numbers = true)]
    coords: Vec<i32>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let boxes = BoundingBox::from_coords(&args.coords)?;
    info!("Drawing {} boxes", boxes.len());

    let mut img = open_image(&args.input)?;
    draw_outlines(&mut img, &boxes, OUTLINE_COLOR);
    save_image(&img, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    info!("Saved {}", args.output.display());
    Ok(())
}
