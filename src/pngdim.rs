//! Image dimension listing for a subset of a PNG directory

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use crate::error::{HeatmapError, Result};

pub const OUTPUT_FILE: &str = "filename_width_height.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSize {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Read `png_dir/<name>.png` dimensions for every non-empty line of the subset file
pub fn list_dimensions(png_dir: &Path, subset_path: &Path) -> Result<Vec<ImageSize>> {
    let subset = fs::read_to_string(subset_path).map_err(|e| HeatmapError::io(subset_path, e))?;

    subset
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            let png = png_dir.join(format!("{}.png", name));
            let (width, height) =
                image::image_dimensions(&png).map_err(|e| HeatmapError::image(&png, e))?;
            Ok(ImageSize {
                name: name.to_string(),
                width,
                height,
            })
        })
        .collect()
}

/// `name width height` per line
pub fn write_listing(sizes: &[ImageSize], out_path: &Path) -> Result<()> {
    let mut content = String::new();
    for size in sizes {
        let _ = writeln!(content, "{} {} {}", size.name, size.width, size.height);
    }
    fs::write(out_path, content).map_err(|e| HeatmapError::io(out_path, e))
}
