//! KML track adaptor
//!
//! KML stores geometry as `<coordinates>` text blocks of whitespace-separated
//! `lon,lat[,alt]` tuples. A pull parse over the document collects every such
//! block, which covers LineString tracks, gx:Track exports converted by other
//! tools, and standalone Point placemarks alike.

use life_trail_lib::TrackPoint;
use quick_xml::Reader;
use quick_xml::events::Event;

use super::{TrackAdaptor, retain_valid};
use crate::error::{ImportError, Result};

pub struct KmlAdaptor;

impl TrackAdaptor for KmlAdaptor {
    fn parse(&self, content: &[u8]) -> Result<Vec<TrackPoint>> {
        let mut reader = Reader::from_reader(content);
        let mut buf = Vec::new();
        let mut in_coordinates = false;
        let mut points = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(element) if element.local_name().as_ref() == b"coordinates" => {
                    in_coordinates = true;
                }
                Event::End(element) if element.local_name().as_ref() == b"coordinates" => {
                    in_coordinates = false;
                }
                Event::Text(text) if in_coordinates => {
                    parse_coordinate_block(&text.unescape()?, &mut points);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let points = retain_valid(points);
        if points.is_empty() {
            return Err(ImportError::EmptyTrack);
        }
        Ok(points)
    }
}

/// Append every parseable `lon,lat[,alt]` tuple in a coordinates block
fn parse_coordinate_block(block: &str, points: &mut Vec<TrackPoint>) {
    for tuple in block.split_whitespace() {
        let mut parts = tuple.split(',');
        let longitude = parts.next().map(str::trim).and_then(|v| v.parse::<f64>().ok());
        let latitude = parts.next().map(str::trim).and_then(|v| v.parse::<f64>().ok());
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => {
                points.push(TrackPoint::new(latitude, longitude));
            }
            _ => tracing::warn!(tuple, "skipping malformed coordinate tuple"),
        }
    }
}
