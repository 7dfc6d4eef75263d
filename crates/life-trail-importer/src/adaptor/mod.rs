//! Per-format track adaptors
//!
//! Each adaptor turns raw file bytes into the ordered point sequence the
//! conversion engine consumes. The engine is agnostic to the source format;
//! selection happens here, keyed on the lowercase file extension.

mod gpx;
mod json;
mod kml;

use std::path::Path;

use life_trail_lib::TrackPoint;

use crate::error::Result;

pub use self::gpx::GpxAdaptor;
pub use self::json::JsonAdaptor;
pub use self::kml::KmlAdaptor;

/// Parses one track file format into an ordered point sequence
pub trait TrackAdaptor {
    fn parse(&self, content: &[u8]) -> Result<Vec<TrackPoint>>;
}

/// Select the adaptor for a file path by its extension.
///
/// Returns `None` for unsupported or missing extensions.
pub fn adaptor_for_path(path: &Path) -> Option<Box<dyn TrackAdaptor>> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "gpx" => Some(Box::new(GpxAdaptor)),
        "kml" => Some(Box::new(KmlAdaptor)),
        "json" => Some(Box::new(JsonAdaptor)),
        _ => None,
    }
}

/// Drop samples with non-finite or out-of-range coordinates.
///
/// A handful of bad fixes should not fail the whole file; the adaptors
/// error out only when nothing valid remains.
fn retain_valid(points: Vec<TrackPoint>) -> Vec<TrackPoint> {
    points
        .into_iter()
        .filter(|point| {
            if point.is_valid() {
                true
            } else {
                tracing::warn!(
                    latitude = point.latitude,
                    longitude = point.longitude,
                    "skipping invalid coordinate"
                );
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adaptor_selection_by_extension() {
        assert!(adaptor_for_path(Path::new("walk.gpx")).is_some());
        assert!(adaptor_for_path(Path::new("walk.KML")).is_some());
        assert!(adaptor_for_path(Path::new("dir/walk.json")).is_some());
        assert!(adaptor_for_path(Path::new("walk.csv")).is_none());
        assert!(adaptor_for_path(Path::new("no_extension")).is_none());
    }

    #[test]
    fn test_retain_valid_drops_bad_fixes() {
        let points = vec![
            TrackPoint::new(51.5, -0.12),
            TrackPoint::new(f64::NAN, 0.0),
            TrackPoint::new(95.0, 0.0),
            TrackPoint::new(51.6, -0.13),
        ];
        let kept = retain_valid(points);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], TrackPoint::new(51.5, -0.12));
    }
}
