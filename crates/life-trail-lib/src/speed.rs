//! Per-point speed estimation

use crate::convert::ConvertConfig;
use crate::geodesic::{TrackPoint, haversine_distance};

/// Nominal walking speed in m/s used to derive the assumed time delta in
/// automatic mode
pub const NOMINAL_WALKING_SPEED_MPS: f64 = 1.5;

/// How the speed column of each output row is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpeedMode {
    /// Derive speed from the distance to the preceding point
    #[default]
    Auto,
    /// Report a fixed, user-configured speed for every row
    Manual,
}

/// Estimate the speed in m/s for the point at `index`.
///
/// Manual mode returns the configured speed regardless of geometry. Automatic
/// mode divides the distance to the predecessor by an assumed time delta of
/// `distance / NOMINAL_WALKING_SPEED_MPS`, floored at 1 second. The assumed
/// delta deliberately ignores the timestamp spacing chosen by the schedule;
/// deriving one from the other would make speed and timestamps mutually
/// dependent.
///
/// The first point (and any out-of-bounds index) has no predecessor and
/// reports 0 in automatic mode.
pub fn estimate_speed(config: &ConvertConfig, points: &[TrackPoint], index: usize) -> f64 {
    if config.speed_mode == SpeedMode::Manual {
        return config.manual_speed;
    }

    if index == 0 || index >= points.len() {
        return 0.0;
    }

    let distance = haversine_distance(points[index - 1], points[index]);
    if distance <= 0.0 {
        return 0.0;
    }

    let assumed_delta_secs = (distance / NOMINAL_WALKING_SPEED_MPS).max(1.0);
    distance / assumed_delta_secs
}
