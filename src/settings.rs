//! Heatmap rendering settings
//!
//! Loads optional overrides from a JSON file in the config directory.
//! Every field has a default, so a partial file is fine.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::colormap::Colormap;
use crate::error::{HeatmapError, Result};

/// Path to the optional settings file
pub const SETTINGS_FILE: &str = "config/heatmap_settings.json";

/// Longest accepted Gaussian window
pub const MAX_KERNEL_LEN: usize = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapSettings {
    /// Gaussian standard deviation in pixels
    pub sigma: f64,
    /// Window length as a multiple of sigma
    pub kernel_span: usize,
    /// Batch files with this extension are parsed as text tables
    pub text_extension: String,
    /// Suffix appended to the batch path for the output image
    pub image_suffix: String,
    pub colormap: Colormap,
    /// Write outputs here instead of next to each batch file
    pub output_dir: Option<PathBuf>,
    /// Also dump the normalized grid as `x y value` lines
    pub write_values: bool,
}

impl Default for HeatmapSettings {
    fn default() -> Self {
        Self {
            sigma: 4.0,
            kernel_span: 6,
            text_extension: "clst".to_string(),
            image_suffix: "png".to_string(),
            colormap: Colormap::Diverging,
            output_dir: None,
            write_values: false,
        }
    }
}

impl HeatmapSettings {
    /// Load settings from an explicit JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| HeatmapError::io(path, e))?;
        let settings: Self =
            serde_json::from_str(&content).map_err(|e| HeatmapError::Settings {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        settings.validate(path)?;
        info!("Loaded heatmap settings from {}", path.display());
        Ok(settings)
    }

    /// Load the default settings file, or built-in defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Number of taps in the Gaussian window, capped at `MAX_KERNEL_LEN`
    pub fn kernel_len(&self) -> usize {
        self.kernel_taps().min(MAX_KERNEL_LEN as f64) as usize
    }

    fn kernel_taps(&self) -> f64 {
        (self.kernel_span as f64 * self.sigma).round()
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |reason: &str| HeatmapError::Settings {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(invalid("sigma must be positive"));
        }
        let taps = self.kernel_taps();
        if taps < 1.0 {
            return Err(invalid("kernel_span * sigma must be at least 1"));
        }
        if taps > MAX_KERNEL_LEN as f64 {
            return Err(invalid(&format!(
                "kernel_span * sigma must be at most {} taps",
                MAX_KERNEL_LEN
            )));
        }
        if self.image_suffix.is_empty() {
            return Err(invalid("image_suffix must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("heatmap_settings_{}_{}", nanos, name))
    }

    #[test]
    fn defaults_give_24_tap_window() {
        let settings = HeatmapSettings::default();
        assert_eq!(settings.kernel_len(), 24);
        assert_eq!(settings.text_extension, "clst");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "sigma": 2.0, "colormap": "jet" }"#).unwrap();

        let settings = HeatmapSettings::from_file(&path).unwrap();
        assert_eq!(settings.sigma, 2.0);
        assert_eq!(settings.colormap, Colormap::Jet);
        assert_eq!(settings.kernel_len(), 12);
        assert_eq!(settings.image_suffix, "png");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn rejects_non_positive_sigma() {
        let path = temp_path("bad.json");
        fs::write(&path, r#"{ "sigma": 0.0 }"#).unwrap();

        let err = HeatmapSettings::from_file(&path).unwrap_err();
        assert!(matches!(err, HeatmapError::Settings { .. }));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn rejects_oversized_window() {
        for (name, json) in [
            ("huge_sigma.json", r#"{ "sigma": 1e300 }"#),
            ("huge_span.json", r#"{ "sigma": 4.0, "kernel_span": 2000 }"#),
        ] {
            let path = temp_path(name);
            fs::write(&path, json).unwrap();

            let err = HeatmapSettings::from_file(&path).unwrap_err();
            match err {
                HeatmapError::Settings { reason, .. } => {
                    assert!(reason.contains("at most"), "{}", reason)
                }
                other => panic!("expected settings error, got {:?}", other),
            }

            let _ = fs::remove_file(&path);
        }
    }

    #[test]
    fn kernel_len_is_capped_for_unvalidated_settings() {
        let settings = HeatmapSettings {
            sigma: 1e300,
            ..HeatmapSettings::default()
        };
        assert_eq!(settings.kernel_len(), MAX_KERNEL_LEN);
    }
}
