//! Point batches - the per-file input of the heatmap builder.
//!
//! A batch is a list of `(x, y, c)` records stored either as a text table or
//! as three contiguous little-endian `i16` arrays (all x, then all y, then
//! all c).

mod binary;
mod text;

pub use binary::{encode_binary, parse_binary};
pub use text::parse_text;

use log::info;
use std::fs;
use std::path::Path;

use crate::error::{HeatmapError, Result};

/// One weighted point: pixel coordinate plus cluster label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRecord {
    pub x: i32,
    pub y: i32,
    pub c: i32,
}

impl PointRecord {
    pub fn new(x: i32, y: i32, c: i32) -> Self {
        Self { x, y, c }
    }
}

/// On-disk layout of a batch file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEncoding {
    /// Whitespace-delimited `x y c` rows
    Text,
    /// Transposed 3xN array of `i16`
    Binary,
}

impl BatchEncoding {
    /// Pick the encoding from the file extension (case-insensitive).
    pub fn detect(path: &Path, text_extension: &str) -> Self {
        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(text_extension));
        if is_text { Self::Text } else { Self::Binary }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }
}

/// Read and parse a batch file with an already chosen encoding
pub fn load_batch(path: &Path, encoding: BatchEncoding) -> Result<Vec<PointRecord>> {
    let points = match encoding {
        BatchEncoding::Text => {
            let content = fs::read_to_string(path).map_err(|e| HeatmapError::io(path, e))?;
            parse_text(&content, path)?
        }
        BatchEncoding::Binary => {
            let bytes = fs::read(path).map_err(|e| HeatmapError::io(path, e))?;
            parse_binary(&bytes, path)?
        }
    };

    if points.is_empty() {
        return Err(HeatmapError::format(path, "batch holds no points"));
    }

    info!(
        "Read {} points from {} ({} features)",
        points.len(),
        path.display(),
        encoding.label()
    );
    Ok(points)
}
