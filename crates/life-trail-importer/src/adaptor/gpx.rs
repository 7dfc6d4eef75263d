//! GPX track adaptor

use life_trail_lib::TrackPoint;

use super::{TrackAdaptor, retain_valid};
use crate::error::{ImportError, Result};

/// Parses GPX documents, flattening tracks and segments in document order
pub struct GpxAdaptor;

impl TrackAdaptor for GpxAdaptor {
    fn parse(&self, content: &[u8]) -> Result<Vec<TrackPoint>> {
        let data = gpx::read(content)?;

        let mut points = Vec::new();
        for track in &data.tracks {
            for segment in &track.segments {
                for waypoint in &segment.points {
                    let position: geo::Point<f64> = waypoint.point();
                    points.push(TrackPoint::new(position.y(), position.x()));
                }
            }
        }

        // Some exporters emit standalone waypoints instead of a track
        if points.is_empty() {
            for waypoint in &data.waypoints {
                let position: geo::Point<f64> = waypoint.point();
                points.push(TrackPoint::new(position.y(), position.x()));
            }
        }

        let points = retain_valid(points);
        if points.is_empty() {
            return Err(ImportError::EmptyTrack);
        }
        Ok(points)
    }
}
