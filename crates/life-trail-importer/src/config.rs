//! Conversion profile persistence and resolution
//!
//! The profile is the JSON file the user edits between runs; CLI flags
//! override individual fields. Resolution turns the human-readable time
//! strings into the immutable [`ConvertConfig`] the engine consumes.

use std::fs;
use std::path::Path;

use life_trail_lib::{ConvertConfig, MIN_GAP_METERS, SpeedMode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::timeparse::parse_time;

/// Persisted conversion settings.
///
/// Empty time strings mean "now" (start) and "unset" (end). An empty
/// timezone means local time; otherwise a fixed UTC offset like `"+08:00"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportProfile {
    pub enable_insert_point: bool,
    pub insert_point_distance: i64,
    pub path_start_time: String,
    pub path_end_time: String,
    pub timezone: String,
    pub default_altitude: f64,
    pub speed_mode: SpeedMode,
    pub manual_speed: f64,
}

impl Default for ImportProfile {
    fn default() -> Self {
        Self {
            enable_insert_point: true,
            insert_point_distance: life_trail_lib::DEFAULT_GAP_METERS,
            path_start_time: String::new(),
            path_end_time: String::new(),
            timezone: String::new(),
            default_altitude: 0.0,
            speed_mode: SpeedMode::Auto,
            manual_speed: 1.5,
        }
    }
}

impl ImportProfile {
    /// Load a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load a profile, falling back to defaults when the file is missing.
    /// A present-but-corrupted file is reported rather than ignored, so a
    /// typo cannot silently discard the user's settings.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no profile file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save the profile as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve the profile into the engine configuration.
    ///
    /// Parses the time strings and enforces the minimum point spacing.
    pub fn resolved(&self) -> Result<ConvertConfig> {
        let timezone = {
            let tz = self.timezone.trim();
            (!tz.is_empty()).then_some(tz)
        };

        let start_timestamp = if self.path_start_time.trim().is_empty() {
            0
        } else {
            parse_time(&self.path_start_time, timezone)?
        };
        let end_timestamp = if self.path_end_time.trim().is_empty() {
            0
        } else {
            parse_time(&self.path_end_time, timezone)?
        };

        let max_gap_meters = if self.enable_insert_point && self.insert_point_distance < MIN_GAP_METERS
        {
            tracing::warn!(
                configured = self.insert_point_distance,
                minimum = MIN_GAP_METERS,
                "point spacing below minimum, clamping"
            );
            MIN_GAP_METERS
        } else {
            self.insert_point_distance
        };

        Ok(ConvertConfig {
            densify_enabled: self.enable_insert_point,
            max_gap_meters,
            start_timestamp,
            end_timestamp,
            speed_mode: self.speed_mode,
            manual_speed: self.manual_speed,
            default_altitude: self.default_altitude,
        })
    }
}
