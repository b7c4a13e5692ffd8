//! Bounding box drawing for detection results

use image::{DynamicImage, GenericImageView, Rgba};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};

use crate::error::{HeatmapError, Result};

pub const OUTLINE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([0, 128, 0, 255]);
pub const HIGHLIGHT_THICKNESS: i32 = 5;

/// Axis-aligned box with inclusive corners, `x1 <= x2` and `y1 <= y2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Corners may be given in either order
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Group a flat `x1 y1 x2 y2 ...` list into boxes
    pub fn from_coords(coords: &[i32]) -> Result<Vec<Self>> {
        if coords.is_empty() || coords.len() % 4 != 0 {
            return Err(HeatmapError::Usage(format!(
                "box coordinates come in groups of four (x1 y1 x2 y2), got {}",
                coords.len()
            )));
        }
        Ok(coords
            .chunks_exact(4)
            .map(|c| Self::new(c[0], c[1], c[2], c[3]))
            .collect())
    }
}

/// Inclusive corners to a `Rect`, clipped to one pixel past each image edge
/// so that off-image sides stay off-image and the size always fits `i32`.
fn inclusive_rect(img: &DynamicImage, x1: i32, y1: i32, x2: i32, y2: i32) -> Rect {
    let (w, h) = img.dimensions();
    let max_x = w.min(i32::MAX as u32 - 1) as i32;
    let max_y = h.min(i32::MAX as u32 - 1) as i32;
    let (x1, x2) = (x1.clamp(-1, max_x), x2.clamp(-1, max_x));
    let (y1, y2) = (y1.clamp(-1, max_y), y2.clamp(-1, max_y));
    let width = (x2 as i64 - x1 as i64 + 1).clamp(1, u32::MAX as i64) as u32;
    let height = (y2 as i64 - y1 as i64 + 1).clamp(1, u32::MAX as i64) as u32;
    Rect::at(x1, y1).of_size(width, height)
}

/// Draw a one-pixel outline for every box
pub fn draw_outlines(img: &mut DynamicImage, boxes: &[BoundingBox], color: Rgba<u8>) {
    for bbox in boxes {
        let rect = inclusive_rect(img, bbox.x1, bbox.y1, bbox.x2, bbox.y2);
        draw_hollow_rect_mut(img, rect, color);
    }
}

/// Draw a thick border as four filled bars: left, top, right, bottom
pub fn draw_highlight(img: &mut DynamicImage, bbox: BoundingBox, thickness: i32, color: Rgba<u8>) {
    let BoundingBox { x1, y1, x2, y2 } = bbox;
    let bars = [
        inclusive_rect(img, x1, y1, x1.saturating_add(thickness), y2),
        inclusive_rect(img, x1, y1, x2, y1.saturating_add(thickness)),
        inclusive_rect(img, x2.saturating_sub(thickness), y1, x2, y2),
        inclusive_rect(img, x1, y2.saturating_sub(thickness), x2, y2),
    ];
    for bar in bars {
        draw_filled_rect_mut(img, bar, color);
    }
}

/// `dir/name.png` -> `dir/name_Bbox.png`
pub fn highlight_output_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match image_path.extension() {
        Some(ext) => format!("{}_Bbox.{}", stem, ext.to_string_lossy()),
        None => format!("{}_Bbox", stem),
    };
    image_path.with_file_name(file_name)
}

pub fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| HeatmapError::image(path, e))
}

pub fn save_image(img: &DynamicImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| HeatmapError::image(path, e))
}
