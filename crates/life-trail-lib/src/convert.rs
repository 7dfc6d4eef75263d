//! Track conversion orchestration
//!
//! Composes the window resolution, densification pre-pass, timestamp schedule
//! and speed estimation into one synchronous pass over a point sequence.

use crate::densify::{densified_row_count, densify_segment};
use crate::geodesic::TrackPoint;
use crate::schedule::{Schedule, TimeWindow};
use crate::speed::{SpeedMode, estimate_speed};
use crate::{ConvertError, Result};

/// Smallest point spacing the configuration layer will hand to the converter
pub const MIN_GAP_METERS: i64 = 30;

/// Default point spacing for densification
pub const DEFAULT_GAP_METERS: i64 = 100;

/// The configuration subset the converter consumes.
///
/// Treated as an immutable value per conversion call. The caller may mutate a
/// running copy between files (e.g. to chain start timestamps across a
/// batch); a single call never mutates shared state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertConfig {
    /// Insert synthetic points so no gap exceeds `max_gap_meters`
    pub densify_enabled: bool,
    /// Maximum separation between consecutive output points, in meters.
    /// The configuration layer clamps this to [`MIN_GAP_METERS`]; the
    /// converter itself only requires it to be positive.
    pub max_gap_meters: i64,
    /// First row's unix timestamp; 0 means "now"
    pub start_timestamp: i64,
    /// Exact unix timestamp for the last row; 0 means unset
    pub end_timestamp: i64,
    /// How the speed column is filled
    pub speed_mode: SpeedMode,
    /// Speed reported for every row in manual mode, m/s
    pub manual_speed: f64,
    /// Altitude reported for every row, meters
    pub default_altitude: f64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            densify_enabled: true,
            max_gap_meters: DEFAULT_GAP_METERS,
            start_timestamp: 0,
            end_timestamp: 0,
            speed_mode: SpeedMode::Auto,
            manual_speed: 1.5,
            default_altitude: 0.0,
        }
    }
}

/// One output row of the converted trail.
///
/// Ordering matches produced output-point order; serialization order is the
/// CSV column order (timestamp, latitude, longitude, altitude, speed).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrailRow {
    /// Unix seconds
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters; fixed per conversion from the configuration
    pub altitude: f64,
    /// Meters per second
    pub speed: f64,
}

/// Convert an ordered point sequence into time-stamped trail rows.
///
/// The input slice is never mutated; when the time window requires reversal a
/// new traversal sequence is materialized, so the same point storage can be
/// reused by the caller across repeated conversions.
///
/// # Errors
/// Returns a configuration error for a non-positive point spacing (with
/// densification enabled) or a negative timestamp.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn convert(config: &ConvertConfig, points: &[TrackPoint]) -> Result<Vec<TrailRow>> {
    if config.densify_enabled && config.max_gap_meters <= 0 {
        return Err(ConvertError::InvalidPointSpacing(config.max_gap_meters));
    }

    let window = TimeWindow::resolve(config.start_timestamp, config.end_timestamp)?;

    if points.is_empty() {
        return Ok(Vec::new());
    }

    // Reversal is decided on the original point order; interpolation below
    // then runs in the already-reversed traversal direction.
    let traversal: Vec<TrackPoint> = if window.reversed {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    };

    let total_rows = if config.densify_enabled {
        densified_row_count(&traversal, config.max_gap_meters)?
    } else {
        traversal.len()
    };
    let schedule = Schedule::plan(window, total_rows);

    let mut rows: Vec<TrailRow> = Vec::with_capacity(total_rows);
    for (index, point) in traversal.iter().enumerate() {
        // Interpolated points inherit the speed of the original pair that
        // produced them.
        let speed = estimate_speed(config, &traversal, index);

        if index == 0 || !config.densify_enabled {
            rows.push(TrailRow {
                timestamp: schedule.timestamp_for(rows.len()),
                latitude: point.latitude,
                longitude: point.longitude,
                altitude: config.default_altitude,
                speed,
            });
        } else {
            for inserted in densify_segment(traversal[index - 1], *point, config.max_gap_meters)? {
                rows.push(TrailRow {
                    timestamp: schedule.timestamp_for(rows.len()),
                    latitude: inserted.latitude,
                    longitude: inserted.longitude,
                    altitude: config.default_altitude,
                    speed,
                });
            }
        }
    }

    tracing::info!(
        original_points = traversal.len(),
        output_rows = rows.len(),
        interval_secs = schedule.interval_secs(),
        reversed = window.reversed,
        "converted track"
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesic::haversine_distance;

    fn fixed_config() -> ConvertConfig {
        ConvertConfig {
            start_timestamp: 1000,
            ..ConvertConfig::default()
        }
    }

    fn short_walk() -> Vec<TrackPoint> {
        vec![
            TrackPoint::new(51.5074, -0.1278),
            TrackPoint::new(51.5076, -0.1276),
            TrackPoint::new(51.5078, -0.1274),
            TrackPoint::new(51.5080, -0.1272),
            TrackPoint::new(51.5082, -0.1270),
        ]
    }

    #[test]
    fn test_empty_input_produces_no_rows() {
        let rows = convert(&fixed_config(), &[]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_row_count_without_densification() {
        let config = ConvertConfig {
            densify_enabled: false,
            ..fixed_config()
        };
        let rows = convert(&config, &short_walk()).unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_huge_gap_matches_input_count() {
        // With a gap larger than any segment, densification is a no-op
        let config = ConvertConfig {
            max_gap_meters: 1_000_000,
            ..fixed_config()
        };
        let rows = convert(&config, &short_walk()).unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_densification_inserts_rows_and_bounds_gaps() {
        // ~1.1 km between the two points, 100 m max gap
        let points = vec![TrackPoint::new(0.0, 0.0), TrackPoint::new(0.0, 0.01)];
        let rows = convert(&fixed_config(), &points).unwrap();
        assert!(rows.len() > points.len());

        for pair in rows.windows(2) {
            let gap = haversine_distance(
                TrackPoint::new(pair[0].latitude, pair[0].longitude),
                TrackPoint::new(pair[1].latitude, pair[1].longitude),
            );
            assert!(gap <= 100.0 + 1e-6);
        }
    }

    #[test]
    fn test_end_time_anchoring() {
        let config = ConvertConfig {
            densify_enabled: false,
            start_timestamp: 1000,
            end_timestamp: 2000,
            ..ConvertConfig::default()
        };
        let rows = convert(&config, &short_walk()).unwrap();
        assert_eq!(rows.first().unwrap().timestamp, 1000);
        assert_eq!(rows.last().unwrap().timestamp, 2000);
    }

    #[test]
    fn test_anchoring_with_densification() {
        let config = ConvertConfig {
            start_timestamp: 1000,
            end_timestamp: 2000,
            ..ConvertConfig::default()
        };
        let points = vec![TrackPoint::new(0.0, 0.0), TrackPoint::new(0.0, 0.01)];
        let rows = convert(&config, &points).unwrap();
        assert!(rows.len() > 2);
        assert_eq!(rows.first().unwrap().timestamp, 1000);
        assert_eq!(rows.last().unwrap().timestamp, 2000);
    }

    #[test]
    fn test_timestamps_are_non_decreasing() {
        let config = ConvertConfig {
            start_timestamp: 1000,
            end_timestamp: 5000,
            ..ConvertConfig::default()
        };
        let points = vec![
            TrackPoint::new(0.0, 0.0),
            TrackPoint::new(0.0, 0.005),
            TrackPoint::new(0.002, 0.005),
        ];
        let rows = convert(&config, &points).unwrap();
        for pair in rows.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_inverted_window_reverses_output_order() {
        let a = TrackPoint::new(10.0, 10.0);
        let b = TrackPoint::new(10.001, 10.0);
        let c = TrackPoint::new(10.002, 10.0);
        let config = ConvertConfig {
            densify_enabled: false,
            start_timestamp: 2000,
            end_timestamp: 1000,
            ..ConvertConfig::default()
        };

        let rows = convert(&config, &[a, b, c]).unwrap();
        assert_eq!(rows.len(), 3);
        // Output order is [C, B, A]
        assert_eq!(rows[0].latitude, c.latitude);
        assert_eq!(rows[2].latitude, a.latitude);
        // Effective window is 1000..2000, timestamps still increase
        assert_eq!(rows[0].timestamp, 1000);
        assert_eq!(rows[2].timestamp, 2000);
    }

    #[test]
    fn test_reversal_does_not_mutate_input() {
        let points = vec![
            TrackPoint::new(10.0, 10.0),
            TrackPoint::new(10.001, 10.0),
            TrackPoint::new(10.002, 10.0),
        ];
        let original = points.clone();
        let config = ConvertConfig {
            start_timestamp: 2000,
            end_timestamp: 1000,
            ..ConvertConfig::default()
        };
        convert(&config, &points).unwrap();
        assert_eq!(points, original);
    }

    #[test]
    fn test_manual_speed_fills_every_row() {
        let config = ConvertConfig {
            speed_mode: SpeedMode::Manual,
            manual_speed: 3.0,
            ..fixed_config()
        };
        let points = vec![TrackPoint::new(0.0, 0.0), TrackPoint::new(0.0, 0.01)];
        let rows = convert(&config, &points).unwrap();
        assert!(rows.len() > 2);
        assert!(rows.iter().all(|row| row.speed == 3.0));
    }

    #[test]
    fn test_default_altitude_fills_every_row() {
        let config = ConvertConfig {
            default_altitude: 123.5,
            ..fixed_config()
        };
        let rows = convert(&config, &short_walk()).unwrap();
        assert!(rows.iter().all(|row| row.altitude == 123.5));
    }

    #[test]
    fn test_single_point_track() {
        let config = ConvertConfig {
            start_timestamp: 1000,
            end_timestamp: 2000,
            ..ConvertConfig::default()
        };
        let rows = convert(&config, &[TrackPoint::new(1.0, 2.0)]).unwrap();
        assert_eq!(rows.len(), 1);
        // A lone row is not anchored to the end time
        assert_eq!(rows[0].timestamp, 1000);
        assert_eq!(rows[0].speed, 0.0);
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let config = ConvertConfig {
            start_timestamp: 1000,
            end_timestamp: 9999,
            ..ConvertConfig::default()
        };
        let points = short_walk();
        let first = convert(&config, &points).unwrap();
        let second = convert(&config, &points).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_spacing_is_rejected() {
        let config = ConvertConfig {
            max_gap_meters: 0,
            ..fixed_config()
        };
        assert!(convert(&config, &short_walk()).is_err());
    }

    #[test]
    fn test_invalid_spacing_ignored_when_densification_off() {
        let config = ConvertConfig {
            densify_enabled: false,
            max_gap_meters: -1,
            ..fixed_config()
        };
        assert!(convert(&config, &short_walk()).is_ok());
    }

    #[test]
    fn test_spacing_below_caller_clamp_still_works() {
        // The configuration layer clamps to MIN_GAP_METERS, but the converter
        // must accept any positive value without crashing.
        let config = ConvertConfig {
            max_gap_meters: 5,
            ..fixed_config()
        };
        let points = vec![TrackPoint::new(0.0, 0.0), TrackPoint::new(0.0, 0.001)];
        let rows = convert(&config, &points).unwrap();
        assert!(rows.len() > 2);
    }
}
