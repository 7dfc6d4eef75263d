//! Life Trail Lib - Track Densification and Temporal Allocation Engine
//!
//! This library turns an ordered sequence of raw GPS track points into
//! time-stamped, speed-annotated rows ready for life-trail CSV ingestion.
//! It is the format-agnostic core of the importer: file parsing, directory
//! scanning and CSV writing live in the application crate.
//!
//! # Architecture
//!
//! - **[`haversine_distance`]**: Great-circle distance on a spherical Earth
//! - **[`densify_segment`]**: Gap-bounded point insertion between samples
//! - **[`estimate_speed`]**: Per-point speed from geometry or a fixed value
//! - **[`Schedule`]**: Timestamp distribution with end-time anchoring
//! - **[`convert`]**: The orchestrating entry point producing [`TrailRow`]s
//!
//! # Behavior Notes
//!
//! - When a configured start time lies after the end time, the traversal
//!   direction is reversed and the two timestamps swap. The input slice is
//!   never mutated; a new sequence is materialized instead.
//! - When an end time is set, the total duration is divided evenly across the
//!   final (densified) row count and the last row is pinned to the exact end
//!   time, so integer division can never drift the anchor.

mod convert;
mod densify;
mod geodesic;
mod schedule;
mod speed;

// Public API exports
pub use convert::{ConvertConfig, DEFAULT_GAP_METERS, MIN_GAP_METERS, TrailRow, convert};
pub use densify::{densified_row_count, densify_segment};
pub use geodesic::{EARTH_RADIUS_M, TrackPoint, haversine_distance};
pub use schedule::{Schedule, TimeWindow};
pub use speed::{NOMINAL_WALKING_SPEED_MPS, SpeedMode, estimate_speed};

/// Error types for the conversion engine
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("point spacing must be positive, got {0} m")]
    InvalidPointSpacing(i64),

    #[error("{field} timestamp is out of range: {value}")]
    TimestampOutOfRange { field: &'static str, value: i64 },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
