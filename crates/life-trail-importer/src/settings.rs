//! Command-line interface definition

use std::path::PathBuf;

use clap::Parser;
use life_trail_lib::SpeedMode;

use crate::config::ImportProfile;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Life Trail Importer - converts GPS track files (GPX/KML/JSON) into
/// time-stamped life-trail CSV
pub struct Settings {
    /// Directory scanned recursively for track files (batch mode)
    #[clap(short, long, value_name = "DIR", default_value = "./source_data")]
    pub source_dir: PathBuf,

    /// Convert a single track file instead of scanning the source directory
    #[clap(short = 'f', long, value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Output CSV file (created with a header, appended to afterwards)
    #[clap(short, long, value_name = "FILE", default_value = "./output.csv")]
    pub output: PathBuf,

    /// Conversion profile (JSON); a missing file falls back to defaults
    #[clap(short, long, value_name = "FILE", default_value = "./config.json")]
    pub config: PathBuf,

    /// Write the effective profile back to the config file
    #[clap(long)]
    pub save_config: bool,

    /// Start time, e.g. "2020-10-20 16:49:00" (default: now)
    #[clap(long, value_name = "TIME")]
    pub start_time: Option<String>,

    /// End time; when set, the total duration is divided across all rows
    #[clap(long, value_name = "TIME")]
    pub end_time: Option<String>,

    /// Fixed timezone offset such as "+08:00" (default: local time)
    #[clap(long, value_name = "OFFSET")]
    pub timezone: Option<String>,

    /// Maximum gap in meters before synthetic points are inserted (min 30)
    #[clap(long, value_name = "METERS")]
    pub point_spacing: Option<i64>,

    /// Disable insertion of synthetic points
    #[clap(long)]
    pub no_densify: bool,

    /// Speed mode for the output rows
    #[clap(long, value_enum)]
    pub speed_mode: Option<SpeedModeArg>,

    /// Fixed speed in m/s for manual speed mode
    #[clap(long, value_name = "MPS")]
    pub manual_speed: Option<f64>,

    /// Altitude in meters written to every row
    #[clap(long, value_name = "METERS")]
    pub altitude: Option<f64>,
}

/// CLI mirror of [`SpeedMode`]
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedModeArg {
    Auto,
    Manual,
}

impl From<SpeedModeArg> for SpeedMode {
    fn from(mode: SpeedModeArg) -> Self {
        match mode {
            SpeedModeArg::Auto => SpeedMode::Auto,
            SpeedModeArg::Manual => SpeedMode::Manual,
        }
    }
}

impl Settings {
    /// Overlay the CLI overrides onto a loaded profile
    pub fn apply_to(&self, profile: &mut ImportProfile) {
        if let Some(start_time) = &self.start_time {
            profile.path_start_time = start_time.clone();
        }
        if let Some(end_time) = &self.end_time {
            profile.path_end_time = end_time.clone();
        }
        if let Some(timezone) = &self.timezone {
            profile.timezone = timezone.clone();
        }
        if let Some(point_spacing) = self.point_spacing {
            profile.insert_point_distance = point_spacing;
        }
        if self.no_densify {
            profile.enable_insert_point = false;
        }
        if let Some(speed_mode) = self.speed_mode {
            profile.speed_mode = speed_mode.into();
        }
        if let Some(manual_speed) = self.manual_speed {
            profile.manual_speed = manual_speed;
        }
        if let Some(altitude) = self.altitude {
            profile.default_altitude = altitude;
        }
    }
}
