//! Zero-centred normalization
//!
//! Positive and negative cells are scaled independently so that zero stays
//! at the midpoint of the color scale however lopsided the two sides are.

use super::DensityGrid;

/// Divisors used for the positive and negative halves of a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationScales {
    pub positive: f64,
    pub negative: f64,
}

impl NormalizationScales {
    /// `max(grid, 0)` and `|min(grid, 0)|`, with 1 substituted for a zero side
    pub fn of(grid: &DensityGrid) -> Self {
        let max = grid.values().iter().copied().fold(0.0, f64::max);
        let min = grid.values().iter().copied().fold(0.0, f64::min);
        Self {
            positive: if max > 0.0 { max } else { 1.0 },
            negative: if min < 0.0 { -min } else { 1.0 },
        }
    }
}

/// Scale the grid into `[-1, 1]` in place and return the divisors used
pub fn normalize_bipolar(grid: &mut DensityGrid) -> NormalizationScales {
    let scales = NormalizationScales::of(grid);
    for value in grid.values_mut() {
        if *value > 0.0 {
            *value /= scales.positive;
        } else if *value < 0.0 {
            *value /= scales.negative;
        }
    }
    scales
}
