//! Color scales for zero-centred grids

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::grid::DensityGrid;

// Channel breakpoints (t, value) of the classic "jet" scale
const JET_RED: [(f64, f64); 5] = [(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: [(f64, f64); 6] = [
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: [(f64, f64); 5] = [(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Blue -> white -> red, white at the midpoint
    #[default]
    Diverging,
    /// Dark blue -> cyan -> yellow -> dark red
    Jet,
}

impl Colormap {
    /// Channel intensities in `[0, 1]` for a position `t` in `[0, 1]`
    pub fn rgb(self, t: f64) -> [f64; 3] {
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Diverging => {
                if t < 0.5 {
                    let s = 2.0 * t;
                    [s, s, 1.0]
                } else {
                    let s = 2.0 * (1.0 - t);
                    [1.0, s, s]
                }
            }
            Colormap::Jet => [
                piecewise(&JET_RED, t),
                piecewise(&JET_GREEN, t),
                piecewise(&JET_BLUE, t),
            ],
        }
    }

    /// Pixel for a normalized value in `[-1, 1]`
    pub fn pixel(self, value: f64) -> Rgb<u8> {
        let [r, g, b] = self.rgb((value + 1.0) / 2.0);
        Rgb([quantize(r), quantize(g), quantize(b)])
    }

    /// Color of a zero-valued cell
    pub fn midpoint(self) -> Rgb<u8> {
        self.pixel(0.0)
    }
}

fn piecewise(points: &[(f64, f64)], t: f64) -> f64 {
    for pair in points.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let frac = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            return v0 + (v1 - v0) * frac;
        }
    }
    points.last().map_or(0.0, |&(_, v)| v)
}

/// Scale by 255 and truncate
fn quantize(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// Map every cell of a normalized grid to a pixel; row `y` becomes image row `y`
pub fn render(grid: &DensityGrid, colormap: Colormap) -> RgbImage {
    let mut img = RgbImage::new(grid.width() as u32, grid.height() as u32);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = colormap.pixel(grid.get(x as usize, y as usize));
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridExtent;

    #[test]
    fn diverging_endpoints_and_midpoint() {
        let map = Colormap::Diverging;
        assert_eq!(map.pixel(-1.0), Rgb([0, 0, 255]));
        assert_eq!(map.pixel(0.0), Rgb([255, 255, 255]));
        assert_eq!(map.pixel(1.0), Rgb([255, 0, 0]));
        assert_eq!(map.midpoint(), Rgb([255, 255, 255]));
    }

    #[test]
    fn diverging_half_values_truncate() {
        // t = 0.75 -> green/blue = 0.5 -> 127.5 truncated
        assert_eq!(Colormap::Diverging.pixel(0.5), Rgb([255, 127, 127]));
        assert_eq!(Colormap::Diverging.pixel(-0.5), Rgb([127, 127, 255]));
    }

    #[test]
    fn jet_matches_breakpoints() {
        let map = Colormap::Jet;
        assert_eq!(map.pixel(-1.0), Rgb([0, 0, 127]));
        assert_eq!(map.pixel(1.0), Rgb([127, 0, 0]));
        let [r, g, b] = map.rgb(0.5);
        assert!((r - 0.15 / 0.31).abs() < 1e-9);
        assert_eq!(g, 1.0);
        assert!((b - (1.0 - 0.16 / 0.31)).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Colormap::Diverging.pixel(3.0), Colormap::Diverging.pixel(1.0));
        assert_eq!(Colormap::Jet.pixel(-4.0), Colormap::Jet.pixel(-1.0));
    }

    #[test]
    fn zero_grid_renders_uniform_midpoint() {
        let grid = DensityGrid::zeros(GridExtent::new(5, 3));
        for map in [Colormap::Diverging, Colormap::Jet] {
            let img = render(&grid, map);
            assert_eq!(img.dimensions(), (5, 3));
            assert!(img.pixels().all(|p| *p == map.midpoint()));
        }
    }

    #[test]
    fn image_rows_follow_grid_rows() {
        let grid = DensityGrid::from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 0.0, -1.0]]).unwrap();
        let img = render(&grid, Colormap::Diverging);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(2, 1), Rgb([0, 0, 255]));
        assert_eq!(*img.get_pixel(1, 0), Rgb([255, 255, 255]));
    }
}
