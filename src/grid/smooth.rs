//! Separable Gaussian smoothing with "same"-size output

use super::DensityGrid;

/// Unnormalized Gaussian window of `len` taps centred at `(len - 1) / 2`
pub fn gaussian_window(len: usize, sigma: f64) -> Vec<f64> {
    let center = (len as f64 - 1.0) / 2.0;
    let denom = 2.0 * sigma * sigma;
    (0..len)
        .map(|i| {
            let n = i as f64 - center;
            (-(n * n) / denom).exp()
        })
        .collect()
}

/// Convolve `input` with `kernel`, keeping the central `input.len()` samples
/// of the full convolution (zero outside the input).
fn convolve_same(input: &[f64], kernel: &[f64], out: &mut [f64]) {
    let n = input.len() as isize;
    let offset = (kernel.len() as isize - 1) / 2;
    for (i, slot) in out.iter_mut().enumerate() {
        let shifted = i as isize + offset;
        let mut acc = 0.0;
        for (j, k) in kernel.iter().enumerate() {
            let src = shifted - j as isize;
            if (0..n).contains(&src) {
                acc += k * input[src as usize];
            }
        }
        *slot = acc;
    }
}

/// Horizontal pass: convolve every row
pub fn convolve_rows(grid: &DensityGrid, kernel: &[f64]) -> DensityGrid {
    let mut out = DensityGrid::zeros(grid.extent());
    let width = grid.width();
    if width == 0 {
        return out;
    }
    for (y, row_out) in out.values_mut().chunks_exact_mut(width).enumerate() {
        convolve_same(grid.row(y), kernel, row_out);
    }
    out
}

/// Vertical pass: convolve every column
pub fn convolve_columns(grid: &DensityGrid, kernel: &[f64]) -> DensityGrid {
    let mut out = DensityGrid::zeros(grid.extent());
    let mut column = vec![0.0; grid.height()];
    let mut smoothed = vec![0.0; grid.height()];
    for x in 0..grid.width() {
        for (y, slot) in column.iter_mut().enumerate() {
            *slot = grid.get(x, y);
        }
        convolve_same(&column, kernel, &mut smoothed);
        for (y, value) in smoothed.iter().enumerate() {
            out.set(x, y, *value);
        }
    }
    out
}

/// Isotropic blur as a horizontal then a vertical pass
pub fn smooth_separable(grid: &DensityGrid, kernel: &[f64]) -> DensityGrid {
    convolve_columns(&convolve_rows(grid, kernel), kernel)
}
