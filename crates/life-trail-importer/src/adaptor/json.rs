//! JSON track adaptor
//!
//! The custom JSON track format is either a bare array of point objects or an
//! object wrapping that array under `"points"`. Point objects accept the
//! common key spellings (`latitude`/`lat`, `longitude`/`lng`/`lon`).

use life_trail_lib::TrackPoint;
use serde::Deserialize;

use super::{TrackAdaptor, retain_valid};
use crate::error::{ImportError, Result};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonTrack {
    Bare(Vec<JsonPoint>),
    Wrapped { points: Vec<JsonPoint> },
}

#[derive(Debug, Deserialize)]
struct JsonPoint {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    longitude: f64,
}

pub struct JsonAdaptor;

impl TrackAdaptor for JsonAdaptor {
    fn parse(&self, content: &[u8]) -> Result<Vec<TrackPoint>> {
        let track: JsonTrack = serde_json::from_slice(content)?;
        let raw = match track {
            JsonTrack::Bare(points) | JsonTrack::Wrapped { points } => points,
        };

        let points = retain_valid(
            raw.into_iter()
                .map(|point| TrackPoint::new(point.latitude, point.longitude))
                .collect(),
        );
        if points.is_empty() {
            return Err(ImportError::EmptyTrack);
        }
        Ok(points)
    }
}
