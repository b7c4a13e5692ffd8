//! Text batch format: one `x y c` row per point

use std::path::Path;

use super::PointRecord;
use crate::error::{HeatmapError, Result};

/// Parse a whitespace-delimited 3-column table.
///
/// Blank lines and `#` comments are skipped. Decimal values are truncated
/// toward zero.
pub fn parse_text(content: &str, path: &Path) -> Result<Vec<PointRecord>> {
    let mut points = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        let &[x, y, c] = columns.as_slice() else {
            return Err(HeatmapError::format(
                path,
                format!(
                    "line {}: expected 3 columns, found {}",
                    line_no + 1,
                    columns.len()
                ),
            ));
        };

        let field = |token: &str| parse_field(token, line_no + 1, path);
        points.push(PointRecord::new(field(x)?, field(y)?, field(c)?));
    }

    Ok(points)
}

fn parse_field(token: &str, line_no: usize, path: &Path) -> Result<i32> {
    if let Ok(value) = token.parse::<i32>() {
        return Ok(value);
    }

    let value: f64 = token.parse().map_err(|_| {
        HeatmapError::format(path, format!("line {}: '{}' is not a number", line_no, token))
    })?;
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < i32::MIN as f64 || truncated > i32::MAX as f64 {
        return Err(HeatmapError::format(
            path,
            format!("line {}: '{}' is out of integer range", line_no, token),
        ));
    }
    Ok(truncated as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<PointRecord>> {
        parse_text(content, Path::new("batch.clst"))
    }

    #[test]
    fn parses_rows_and_skips_comments() {
        let points = parse("# x y c\n0 0 0\n\n  12\t7 3  \n5 9 1 # last\n").unwrap();
        assert_eq!(
            points,
            vec![
                PointRecord::new(0, 0, 0),
                PointRecord::new(12, 7, 3),
                PointRecord::new(5, 9, 1),
            ]
        );
    }

    #[test]
    fn truncates_decimal_values() {
        let points = parse("1.0 2.9 3.0\n1e1 0.5 -0.7\n").unwrap();
        assert_eq!(
            points,
            vec![PointRecord::new(1, 2, 3), PointRecord::new(10, 0, 0)]
        );
    }

    #[test]
    fn rejects_wrong_column_count() {
        let err = parse("1 2 3\n4 5\n").unwrap_err();
        match err {
            HeatmapError::Format { reason, .. } => {
                assert!(reason.contains("line 2"), "{}", reason);
                assert!(reason.contains("found 2"), "{}", reason);
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_numeric_and_overflow() {
        assert!(matches!(parse("1 two 3\n"), Err(HeatmapError::Format { .. })));
        assert!(matches!(parse("1 2 1e12\n"), Err(HeatmapError::Format { .. })));
        assert!(matches!(parse("nan 2 3\n"), Err(HeatmapError::Format { .. })));
    }
}
