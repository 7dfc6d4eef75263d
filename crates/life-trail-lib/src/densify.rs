//! Gap-bounded point insertion between consecutive track samples
//!
//! Sparse recordings (e.g. one fix per minute while driving) leave large
//! holes in the trail. Densification inserts evenly spaced synthetic points
//! so that no consecutive pair is further apart than the configured maximum
//! gap. Interpolation is linear in latitude/longitude, which is an acceptable
//! approximation at these point densities.

use crate::geodesic::{TrackPoint, haversine_distance};
use crate::{ConvertError, Result};

/// Number of sub-segments needed so no gap exceeds `max_gap_meters`.
///
/// Coincident points yield a single segment, so a degenerate pair still
/// produces exactly one output point (`curr` itself).
#[inline]
fn segment_count(prev: TrackPoint, curr: TrackPoint, max_gap_meters: i64) -> usize {
    let distance = haversine_distance(prev, curr);
    let segments = (distance / max_gap_meters as f64).ceil() as usize;
    segments.max(1)
}

/// Densify the segment between `prev` and `curr`.
///
/// Returns the points strictly after `prev` up to and including `curr`, so
/// that every consecutive pair (including the implicit `(prev, first)`) is at
/// most `max_gap_meters` apart. The last returned point is exactly `curr`.
///
/// # Arguments
/// * `prev` - Segment start (not included in the output)
/// * `curr` - Segment end (always the last output point)
/// * `max_gap_meters` - Maximum allowed separation; must be positive
pub fn densify_segment(
    prev: TrackPoint,
    curr: TrackPoint,
    max_gap_meters: i64,
) -> Result<Vec<TrackPoint>> {
    if max_gap_meters <= 0 {
        return Err(ConvertError::InvalidPointSpacing(max_gap_meters));
    }

    let segments = segment_count(prev, curr, max_gap_meters);
    let mut out = Vec::with_capacity(segments);
    for i in 1..=segments {
        if i == segments {
            // Emit the endpoint verbatim rather than the interpolated value,
            // so the original sample survives floating-point rounding.
            out.push(curr);
        } else {
            let fraction = i as f64 / segments as f64;
            out.push(TrackPoint::new(
                prev.latitude + (curr.latitude - prev.latitude) * fraction,
                prev.longitude + (curr.longitude - prev.longitude) * fraction,
            ));
        }
    }

    Ok(out)
}

/// Total row count a track will produce after densification.
///
/// One row for the first point plus the per-pair segment counts. This
/// pre-pass exists because the per-row time interval depends on the final row
/// count, which is only known after accounting for inserted points. It shares
/// the segment arithmetic with [`densify_segment`] so the two cannot disagree.
///
/// An empty input produces 0 rows.
pub fn densified_row_count(points: &[TrackPoint], max_gap_meters: i64) -> Result<usize> {
    if max_gap_meters <= 0 {
        return Err(ConvertError::InvalidPointSpacing(max_gap_meters));
    }
    if points.is_empty() {
        return Ok(0);
    }

    let mut total = 1;
    for pair in points.windows(2) {
        total += segment_count(pair[0], pair[1], max_gap_meters);
    }
    Ok(total)
}
