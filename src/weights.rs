//! Weight table - one real weight per cluster label

use rand::Rng;
use std::fs;
use std::path::Path;

use crate::error::{HeatmapError, Result};

/// Per-cluster weights, indexed by 0-based cluster label
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: Vec<f64>,
}

impl WeightTable {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Load a whitespace/newline delimited weight file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| HeatmapError::io(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse weight file content. `#` starts a comment that runs to end of line.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut weights = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default();
            for token in line.split_whitespace() {
                let value: f64 = token.parse().map_err(|_| {
                    HeatmapError::format(
                        path,
                        format!("line {}: '{}' is not a number", line_no + 1, token),
                    )
                })?;
                if !value.is_finite() {
                    return Err(HeatmapError::format(
                        path,
                        format!("line {}: weight {} is not finite", line_no + 1, token),
                    ));
                }
                weights.push(value);
            }
        }

        if weights.is_empty() {
            return Err(HeatmapError::format(path, "weight file holds no weights"));
        }

        Ok(Self { weights })
    }

    /// Weight for a cluster label
    pub fn get(&self, label: i32) -> Result<f64> {
        usize::try_from(label)
            .ok()
            .and_then(|idx| self.weights.get(idx).copied())
            .ok_or(HeatmapError::LabelOutOfRange {
                label,
                len: self.weights.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Uniform random weights in `[-max, max)`
    pub fn random(dim: usize, max: f64, rng: &mut impl Rng) -> Self {
        let weights = (0..dim).map(|_| rng.gen_range(-max..max)).collect();
        Self { weights }
    }

    /// Write one weight per line
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let mut content = String::with_capacity(self.weights.len() * 12);
        for w in &self.weights {
            content.push_str(&format!("{}\n", w));
        }
        fs::write(path, content).map_err(|e| HeatmapError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn path() -> PathBuf {
        PathBuf::from("weights.txt")
    }

    #[test]
    fn parses_mixed_whitespace_and_comments() {
        let table = WeightTable::parse("1.0 2.5\n# comment\n-3e-1\t4 # trailing\n\n", &path())
            .unwrap();
        assert_eq!(table.as_slice(), &[1.0, 2.5, -0.3, 4.0]);
    }

    #[test]
    fn rejects_garbage_token() {
        let err = WeightTable::parse("1.0\nabc\n", &path()).unwrap_err();
        match err {
            HeatmapError::Format { reason, .. } => assert!(reason.contains("line 2")),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(
            WeightTable::parse("  \n# nothing\n", &path()),
            Err(HeatmapError::Format { .. })
        ));
    }

    #[test]
    fn label_lookup_is_bounds_checked() {
        let table = WeightTable::new(vec![0.5, -1.0]);
        assert_eq!(table.get(1).unwrap(), -1.0);
        assert!(table.get(2).unwrap_err().is_range());
        assert!(table.get(-1).unwrap_err().is_range());
    }

    #[test]
    fn random_weights_respect_bounds_and_seed() {
        let a = WeightTable::random(50, 0.1, &mut StdRng::seed_from_u64(7));
        let b = WeightTable::random(50, 0.1, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert!(a.as_slice().iter().all(|w| (-0.1..0.1).contains(w)));
    }

    #[test]
    fn written_file_loads_back() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let file = std::env::temp_dir().join(format!("weights_test_{}.txt", nanos));
        let table = WeightTable::new(vec![0.25, -1.5, 3.0]);
        table.write_to_file(&file).unwrap();

        assert_eq!(WeightTable::load(&file).unwrap(), table);
        let _ = fs::remove_file(&file);
    }
}
