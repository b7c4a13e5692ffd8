//! Error type shared by the heatmap pipeline and the drawing tools.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::batch::PointRecord;

#[derive(Debug, Error)]
pub enum HeatmapError {
    /// Missing or malformed command line arguments
    #[error("usage: {0}")]
    Usage(String),

    /// Unparseable weight or batch file
    #[error("{}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    /// Point outside the grid extent
    #[error("point ({}, {}) lies outside the {width}x{height} grid", .record.x, .record.y)]
    PointOutOfRange {
        record: PointRecord,
        width: usize,
        height: usize,
    },

    /// Extent too large to allocate or encode
    #[error("{width}x{height} grid exceeds the limit of {max_cells} cells")]
    GridTooLarge {
        width: usize,
        height: usize,
        max_cells: usize,
    },

    /// Cluster label with no entry in the weight table
    #[error("cluster label {label} has no weight (table holds {len} weights)")]
    LabelOutOfRange { label: i32, len: usize },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid settings {}: {reason}", .path.display())]
    Settings { path: PathBuf, reason: String },
}

impl HeatmapError {
    pub fn format(path: &Path, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn image(path: &Path, source: image::ImageError) -> Self {
        Self::Image {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for range violations: coordinates, labels or grid size.
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            Self::PointOutOfRange { .. }
                | Self::LabelOutOfRange { .. }
                | Self::GridTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
