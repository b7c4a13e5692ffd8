//! Heatmap builder: batch file in, color image out.
//!
//! Each batch goes through parse -> extent -> accumulate -> smooth ->
//! normalize -> color map -> save. Batches are independent; a failing batch
//! is logged and skipped so the remaining ones still get written.

use image::RgbImage;
use log::{info, warn};
use std::ffi::OsString;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{BatchEncoding, PointRecord, load_batch};
use crate::colormap::render;
use crate::error::{HeatmapError, Result};
use crate::grid::{
    DensityGrid, GridExtent, GridSummary, NormalizationScales, gaussian_window, normalize_bipolar,
    smooth_separable,
};
use crate::settings::HeatmapSettings;
use crate::weights::WeightTable;

/// Everything produced for one batch before it is written out
#[derive(Debug, Clone)]
pub struct Heatmap {
    /// Statistics of the smoothed grid before normalization
    pub smoothed: GridSummary,
    pub scales: NormalizationScales,
    /// Smoothed grid scaled into `[-1, 1]`
    pub normalized: DensityGrid,
    pub image: RgbImage,
}

/// Outcome of a multi-batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, HeatmapError)>,
}

impl BatchReport {
    pub fn all_written(&self) -> bool {
        self.skipped.is_empty()
    }
}

pub struct HeatmapBuilder {
    weights: WeightTable,
    settings: HeatmapSettings,
    kernel: Vec<f64>,
}

impl HeatmapBuilder {
    pub fn new(weights: WeightTable, settings: HeatmapSettings) -> Self {
        let kernel = gaussian_window(settings.kernel_len(), settings.sigma);
        Self {
            weights,
            settings,
            kernel,
        }
    }

    /// Raw accumulated grid, sized from the batch's own coordinate range
    pub fn accumulate(&self, points: &[PointRecord]) -> Result<DensityGrid> {
        let extent = GridExtent::from_points(points).unwrap_or(GridExtent::new(0, 0));
        DensityGrid::accumulate(points, &self.weights, extent)
    }

    /// Smooth, normalize and color an accumulated grid
    pub fn render_grid(&self, raw: &DensityGrid) -> Heatmap {
        let mut normalized = smooth_separable(raw, &self.kernel);
        let smoothed = normalized.summary();
        let scales = normalize_bipolar(&mut normalized);
        let image = render(&normalized, self.settings.colormap);
        Heatmap {
            smoothed,
            scales,
            normalized,
            image,
        }
    }

    /// Full pipeline on in-memory points
    pub fn render_points(&self, points: &[PointRecord]) -> Result<Heatmap> {
        let raw = self.accumulate(points)?;
        Ok(self.render_grid(&raw))
    }

    /// `<batch>.<suffix>`, placed in the output directory when one is set
    pub fn output_path(&self, batch_path: &Path) -> PathBuf {
        let base: OsString = match (&self.settings.output_dir, batch_path.file_name()) {
            (Some(_), Some(name)) => name.to_os_string(),
            _ => batch_path.as_os_str().to_os_string(),
        };
        let mut name = base;
        name.push(".");
        name.push(&self.settings.image_suffix);

        match &self.settings.output_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Read one batch file and write its heatmap; returns the image path
    pub fn process_batch(&self, batch_path: &Path) -> Result<PathBuf> {
        let encoding = BatchEncoding::detect(batch_path, &self.settings.text_extension);
        let points = load_batch(batch_path, encoding)?;
        let heatmap = self.render_points(&points)?;

        let summary = heatmap.smoothed;
        info!(
            "Grid {}x{}: min {:.4} max {:.4} mean {:.4} ({} positive, {} negative cells)",
            heatmap.normalized.width(),
            heatmap.normalized.height(),
            summary.min,
            summary.max,
            summary.mean,
            summary.positive,
            summary.negative
        );

        let out_path = self.output_path(batch_path);
        if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HeatmapError::io(parent, e))?;
        }
        heatmap
            .image
            .save(&out_path)
            .map_err(|e| HeatmapError::image(&out_path, e))?;

        if self.settings.write_values {
            let mut data_name = out_path.clone().into_os_string();
            data_name.push(".txt");
            let data_path = PathBuf::from(data_name);
            fs::write(&data_path, grid_values_text(&heatmap.normalized))
                .map_err(|e| HeatmapError::io(&data_path, e))?;
            info!("Saved {}", data_path.display());
        }

        info!("Saved {}", out_path.display());
        Ok(out_path)
    }

    /// Process every batch in order, skipping the ones that fail
    pub fn run(&self, batch_paths: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();
        for path in batch_paths {
            match self.process_batch(path) {
                Ok(out) => report.written.push(out),
                Err(err) => {
                    warn!("Skipping {}: {}", path.display(), err);
                    report.skipped.push((path.clone(), err));
                }
            }
        }
        report
    }
}

/// One `x y value` line per cell, row by row
fn grid_values_text(grid: &DensityGrid) -> String {
    let mut data = String::from("x y value\n");
    for y in 0..grid.height() {
        for (x, value) in grid.row(y).iter().enumerate() {
            let _ = writeln!(data, "{} {} {:.6}", x, y, value);
        }
    }
    data
}
