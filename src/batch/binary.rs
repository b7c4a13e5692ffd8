//! Binary batch format
//!
//! A file of `6 * n` bytes holds three arrays of `n` little-endian `i16`:
//! all x values, then all y values, then all cluster labels.

use std::path::Path;

use super::PointRecord;
use crate::error::{HeatmapError, Result};

const RECORD_BYTES: usize = 3 * std::mem::size_of::<i16>();

/// Decode the transposed 3xN layout into per-point records
pub fn parse_binary(bytes: &[u8], path: &Path) -> Result<Vec<PointRecord>> {
    if bytes.len() % RECORD_BYTES != 0 {
        return Err(HeatmapError::format(
            path,
            format!(
                "size {} bytes is not a multiple of {} (trailing partial record)",
                bytes.len(),
                RECORD_BYTES
            ),
        ));
    }

    let count = bytes.len() / RECORD_BYTES;
    let values: Vec<i32> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as i32)
        .collect();
    let (xs, rest) = values.split_at(count);
    let (ys, cs) = rest.split_at(count);

    Ok(xs
        .iter()
        .zip(ys)
        .zip(cs)
        .map(|((&x, &y), &c)| PointRecord::new(x, y, c))
        .collect())
}

/// Encode records into the transposed layout.
///
/// Values outside the `i16` range are saturated.
pub fn encode_binary(points: &[PointRecord]) -> Vec<u8> {
    let clamp = |v: i32| v.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    let mut bytes = Vec::with_capacity(points.len() * RECORD_BYTES);
    for column in [
        points.iter().map(|p| p.x).collect::<Vec<_>>(),
        points.iter().map(|p| p.y).collect(),
        points.iter().map(|p| p.c).collect(),
    ] {
        for value in column {
            bytes.extend_from_slice(&clamp(value).to_le_bytes());
        }
    }
    bytes
}
