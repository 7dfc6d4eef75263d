//! Tolerant parsing of human-entered time strings
//!
//! Profile files and CLI overrides carry times as strings in a handful of
//! common layouts. RFC3339 inputs bring their own offset; everything else is
//! interpreted in the configured fixed offset, falling back to local time.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::{ImportError, Result};

/// Accepted layouts with a time component, most precise first
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts, interpreted as midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a time string into unix seconds.
///
/// `timezone` is an optional fixed UTC offset such as `"+08:00"`; when absent
/// the system local timezone applies. RFC3339 inputs ignore `timezone`
/// because they are already offset-qualified.
pub fn parse_time(input: &str, timezone: Option<&str>) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ImportError::InvalidTime("<empty>".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.timestamp());
    }

    let offset = match timezone {
        Some(tz) if !tz.trim().is_empty() => Some(parse_offset(tz.trim())?),
        _ => None,
    };

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return to_unix(naive, offset, trimmed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return to_unix(NaiveDateTime::new(date, NaiveTime::MIN), offset, trimmed);
        }
    }

    Err(ImportError::InvalidTime(trimmed.to_string()))
}

fn parse_offset(timezone: &str) -> Result<FixedOffset> {
    timezone
        .parse::<FixedOffset>()
        .map_err(|_| ImportError::InvalidTime(format!("invalid timezone offset: {timezone}")))
}

fn to_unix(naive: NaiveDateTime, offset: Option<FixedOffset>, original: &str) -> Result<i64> {
    let resolved = match offset {
        Some(offset) => offset.from_local_datetime(&naive).earliest(),
        None => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.fixed_offset()),
    };
    resolved
        .map(|datetime| datetime.timestamp())
        .ok_or_else(|| ImportError::InvalidTime(original.to_string()))
}
