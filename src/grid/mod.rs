//! Density grid: weighted point counts on a row-major pixel grid.

mod normalize;
mod smooth;

pub use normalize::{NormalizationScales, normalize_bipolar};
pub use smooth::{convolve_columns, convolve_rows, gaussian_window, smooth_separable};

use crate::batch::PointRecord;
use crate::error::{HeatmapError, Result};
use crate::weights::WeightTable;

/// Largest grid a batch may ask for (8192 x 8192 cells, 512 MiB of `f64`)
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridExtent {
    pub width: usize,
    pub height: usize,
}

impl GridExtent {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Extent of a batch: `max + min + 1` on each axis.
    ///
    /// This assumes the point cloud has equal margins on both sides, so a
    /// shifted cloud can still exceed it; `DensityGrid::accumulate` rejects
    /// such points. Returns `None` for an empty batch.
    pub fn from_points(points: &[PointRecord]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        let span = |min: i32, max: i32| (max as i64 + min as i64 + 1).max(0) as usize;
        Some(Self {
            width: span(min_x, max_x),
            height: span(min_y, max_y),
        })
    }

    /// Number of cells, or an error if the extent is too large to allocate
    /// or to encode as an image
    pub fn cell_count(&self) -> Result<usize> {
        let too_large = || HeatmapError::GridTooLarge {
            width: self.width,
            height: self.height,
            max_cells: MAX_GRID_CELLS,
        };
        if self.width > u32::MAX as usize || self.height > u32::MAX as usize {
            return Err(too_large());
        }
        self.width
            .checked_mul(self.height)
            .filter(|cells| *cells <= MAX_GRID_CELLS)
            .ok_or_else(too_large)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

/// Row-major grid of real values, `height` rows by `width` columns
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl DensityGrid {
    pub fn zeros(extent: GridExtent) -> Self {
        Self {
            width: extent.width,
            height: extent.height,
            values: vec![0.0; extent.width * extent.height],
        }
    }

    /// Build a grid from explicit rows. All rows must share one length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height: rows.len(),
            values: rows.concat(),
        })
    }

    /// Sum `weight[c]` into cell `(y, x)` for every record
    pub fn accumulate(
        points: &[PointRecord],
        weights: &WeightTable,
        extent: GridExtent,
    ) -> Result<Self> {
        extent.cell_count()?;
        let mut grid = Self::zeros(extent);
        for record in points {
            if !extent.contains(record.x, record.y) {
                return Err(HeatmapError::PointOutOfRange {
                    record: *record,
                    width: extent.width,
                    height: extent.height,
                });
            }
            let weight = weights.get(record.c)?;
            grid.add(record.x as usize, record.y as usize, weight);
        }
        Ok(grid)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let idx = self.index(x, y);
        self.values[idx] = value;
    }

    pub fn add(&mut self, x: usize, y: usize, value: f64) {
        let idx = self.index(x, y);
        self.values[idx] += value;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn extent(&self) -> GridExtent {
        GridExtent::new(self.width, self.height)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn row(&self, y: usize) -> &[f64] {
        &self.values[y * self.width..(y + 1) * self.width]
    }

    pub fn summary(&self) -> GridSummary {
        GridSummary::of(&self.values)
    }
}

/// Basic statistics of a grid, for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub positive: usize,
    pub negative: usize,
}

impl GridSummary {
    fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                positive: 0,
                negative: 0,
            };
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Self {
            min,
            max,
            mean,
            positive: values.iter().filter(|v| **v > 0.0).count(),
            negative: values.iter().filter(|v| **v < 0.0).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_uses_max_plus_min() {
        let points = [PointRecord::new(0, 0, 0), PointRecord::new(1, 1, 1)];
        assert_eq!(GridExtent::from_points(&points), Some(GridExtent::new(2, 2)));

        let margins = [PointRecord::new(3, 5, 0), PointRecord::new(10, 7, 0)];
        assert_eq!(
            GridExtent::from_points(&margins),
            Some(GridExtent::new(14, 13))
        );

        assert_eq!(GridExtent::from_points(&[]), None);
    }

    #[test]
    fn accumulates_weights_per_cell() {
        let weights = WeightTable::new(vec![1.0, 2.0]);
        let points = [
            PointRecord::new(0, 0, 0),
            PointRecord::new(1, 1, 1),
            PointRecord::new(1, 1, 1),
            PointRecord::new(1, 0, 0),
        ];
        let grid = DensityGrid::accumulate(&points, &weights, GridExtent::new(2, 2)).unwrap();
        assert_eq!(grid.row(0), &[1.0, 1.0]);
        assert_eq!(grid.row(1), &[0.0, 4.0]);
    }

    #[test]
    fn rows_are_y_and_columns_are_x() {
        let weights = WeightTable::new(vec![5.0]);
        let points = [PointRecord::new(2, 0, 0)];
        let grid = DensityGrid::accumulate(&points, &weights, GridExtent::new(3, 2)).unwrap();
        assert_eq!(grid.get(2, 0), 5.0);
        assert_eq!(grid.row(1), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn out_of_extent_point_is_a_range_error() {
        let weights = WeightTable::new(vec![1.0]);
        let shifted = [PointRecord::new(8, 1, 0), PointRecord::new(9, 1, 0)];
        let extent = GridExtent::new(2, 2);
        let err = DensityGrid::accumulate(&shifted, &weights, extent).unwrap_err();
        assert!(err.is_range());

        let negative = [PointRecord::new(-1, 0, 0)];
        let err = DensityGrid::accumulate(&negative, &weights, extent).unwrap_err();
        assert!(err.is_range());
    }

    #[test]
    fn oversized_extent_is_rejected_before_allocating() {
        let weights = WeightTable::new(vec![1.0]);

        let huge = [PointRecord::new(2_000_000_000, 2_000_000_000, 0)];
        let extent = GridExtent::from_points(&huge).unwrap();
        let err = DensityGrid::accumulate(&huge, &weights, extent).unwrap_err();
        assert!(matches!(err, HeatmapError::GridTooLarge { .. }));

        // Largest binary coordinate: 65535 x 65535 cells
        let corner = [PointRecord::new(i16::MAX as i32, i16::MAX as i32, 0)];
        let extent = GridExtent::from_points(&corner).unwrap();
        assert_eq!(extent, GridExtent::new(65535, 65535));
        assert!(extent.cell_count().unwrap_err().is_range());

        assert!(GridExtent::new(usize::MAX, 2).cell_count().is_err());
        assert_eq!(GridExtent::new(8192, 8192).cell_count().unwrap(), MAX_GRID_CELLS);
    }

    #[test]
    fn unknown_label_is_a_range_error() {
        let weights = WeightTable::new(vec![1.0]);
        let points = [PointRecord::new(0, 0, 3)];
        let err = DensityGrid::accumulate(&points, &weights, GridExtent::new(1, 1)).unwrap_err();
        assert!(matches!(err, HeatmapError::LabelOutOfRange { label: 3, len: 1 }));
    }

    #[test]
    fn summary_counts_signs() {
        let grid = DensityGrid::from_rows(&[vec![-2.0, 0.0], vec![1.0, 5.0]]).unwrap();
        let summary = grid.summary();
        assert_eq!(summary.min, -2.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.mean, 1.0);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(DensityGrid::from_rows(&[vec![1.0], vec![1.0, 2.0]]).is_none());
    }
}
