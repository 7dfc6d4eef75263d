//! Error types for the importer application

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPX parsing error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("KML parsing error: {0}")]
    Kml(#[from] quick_xml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("conversion error: {0}")]
    Convert(#[from] life_trail_lib::ConvertError),

    #[error("unsupported track format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("no usable track points in file")]
    EmptyTrack,

    #[error("cannot parse time string: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
