//! Timestamp distribution across the output row sequence

use crate::{ConvertError, Result};

/// The resolved time window for one conversion.
///
/// Resolution happens once, before any per-point work: a zero start means
/// "now", and a start later than a configured end reverses the traversal
/// direction and swaps the two timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// First row's timestamp (unix seconds)
    pub start: i64,
    /// Exact timestamp for the last row, when configured
    pub end: Option<i64>,
    /// Whether the input points must be traversed back to front
    pub reversed: bool,
}

impl TimeWindow {
    /// Resolve the raw configuration timestamps.
    ///
    /// `start_timestamp == 0` substitutes the current wall-clock time;
    /// `end_timestamp == 0` means no end anchor. Negative values are a
    /// configuration error.
    pub fn resolve(start_timestamp: i64, end_timestamp: i64) -> Result<Self> {
        if start_timestamp < 0 {
            return Err(ConvertError::TimestampOutOfRange {
                field: "start",
                value: start_timestamp,
            });
        }
        if end_timestamp < 0 {
            return Err(ConvertError::TimestampOutOfRange {
                field: "end",
                value: end_timestamp,
            });
        }

        let start = if start_timestamp == 0 {
            chrono::Utc::now().timestamp()
        } else {
            start_timestamp
        };

        if end_timestamp > 0 && start > end_timestamp {
            tracing::info!(
                start,
                end = end_timestamp,
                "start time is after end time, reversing traversal direction"
            );
            return Ok(Self {
                start: end_timestamp,
                end: Some(start),
                reversed: true,
            });
        }

        Ok(Self {
            start,
            end: (end_timestamp > 0).then_some(end_timestamp),
            reversed: false,
        })
    }
}

/// Per-row timestamp assignment for a fixed row count.
///
/// When an end time is configured and more than one row exists, the total
/// duration is divided evenly (integer seconds) across the gaps and the last
/// row is pinned to the exact end time. Otherwise rows advance by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    start: i64,
    end: Option<i64>,
    interval_secs: i64,
    total_rows: usize,
}

impl Schedule {
    /// Plan timestamps for `total_rows` output rows within `window`.
    pub fn plan(window: TimeWindow, total_rows: usize) -> Self {
        let interval_secs = match window.end {
            Some(end) if total_rows > 1 => {
                let per_gap = (end - window.start) / (total_rows as i64 - 1);
                // Clamped to one second so a degenerate window still makes
                // forward progress.
                per_gap.max(1)
            }
            _ => 1,
        };

        Self {
            start: window.start,
            end: window.end,
            interval_secs,
            total_rows,
        }
    }

    /// The timestamp for the row at `row_index`.
    pub fn timestamp_for(&self, row_index: usize) -> i64 {
        if self.total_rows > 1
            && row_index + 1 == self.total_rows
            && let Some(end) = self.end
        {
            // Anchor the final row against integer-division drift
            return end;
        }
        self.start + row_index as i64 * self.interval_secs
    }

    /// Seconds between consecutive rows
    #[inline]
    pub fn interval_secs(&self) -> i64 {
        self.interval_secs
    }
}
