//! heatmap_viz - visualization tools for object-detection style data
//!
//! The core is the heatmap pipeline: weighted point clusters are accumulated
//! into a density grid, blurred with a separable Gaussian, normalized around
//! zero and mapped through a diverging color scale. Around it sit small
//! helpers for drawing bounding boxes, generating weight tables and listing
//! image dimensions.

pub mod batch;
pub mod boxes;
pub mod builder;
pub mod cli;
pub mod colormap;
pub mod error;
pub mod grid;
pub mod pngdim;
pub mod settings;
pub mod weights;

// Re-export commonly used types for convenience
pub use batch::{BatchEncoding, PointRecord, load_batch};
pub use builder::{BatchReport, Heatmap, HeatmapBuilder};
pub use colormap::Colormap;
pub use error::{HeatmapError, Result};
pub use grid::{DensityGrid, GridExtent, GridSummary, NormalizationScales};
pub use settings::HeatmapSettings;
pub use weights::WeightTable;
