//! Highlight a single bounding box with a thick green border
//!
//! Usage:
//!   cargo run --bin draw_bbox -- image.jpg x1 y1 x2 y2
//!
//! Writes `image_Bbox.jpg` next to the input and prints its path.

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use std::path::PathBuf;

use heatmap_viz::boxes::{
    BoundingBox, HIGHLIGHT_COLOR, HIGHLIGHT_THICKNESS, draw_highlight, highlight_output_path,
    open_image, save_image,
};
use heatmap_viz::cli::init_logging;

#[derive(Parser, Debug)]
#[command(name = "draw_bbox", about = "Draw a highlighted border around one box")]
struct Args {
    #[arg(value_hint = ValueHint::FilePath)]
    image: PathBuf,
    #[arg(allow_negative_numbers = true)]
    x1: i32,
    #[arg(allow_negative_numbers = true)]
    y1: i32,
    #[arg(allow_negative_numbers = true)]
    x2: i32,
    #[arg(allow_negative_numbers = true)]
    y2: i32,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let bbox = BoundingBox::new(args.x1, args.y1, args.x2, args.y2);
    let mut img = open_image(&args.image)?;
    draw_highlight(&mut img, bbox, HIGHLIGHT_THICKNESS, HIGHLIGHT_COLOR);

    let out = highlight_output_path(&args.image);
    save_image(&img, &out).with_context(|| format!("Failed to save {}", out.display()))?;
    println!("{}", out.display());
    Ok(())
}
