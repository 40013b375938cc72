use serde::{Deserialize, Serialize};

use crate::error::GpxTrackError;
use crate::metrics::{self, ElevationSample};
use crate::parser;

/// Display-color tag carried by every track. The rendering layer maps
/// it to a concrete hex value via [`crate::theme::resolve_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackColor {
    ThemeDefault,
}

/// One parsed GPX route with its derived trip statistics, immutable
/// once constructed. `visible` is initialized here but owned by the UI
/// state layer afterwards; this crate never reads it back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    /// (lat, lon) pairs in input order; never empty.
    pub coordinates: Vec<[f64; 2]>,
    /// Aligned 1:1 with `coordinates`; None where the point had no <ele>.
    pub elevations: Vec<Option<f64>>,
    pub elevation_profile: Vec<ElevationSample>,
    /// Total path length in kilometers.
    pub distance: f64,
    /// Meters of ascent.
    pub elevation_gain: f64,
    /// Meters of descent.
    pub elevation_loss: f64,
    /// Max minus min elevation in meters; None when no point has elevation.
    pub elevation_range: Option<f64>,
    /// Minutes; None when fewer than two points carry timestamps.
    pub duration: Option<f64>,
    pub color: TrackColor,
    pub visible: bool,
}

/// Assemble one immutable track record from a GPX file's contents.
///
/// `created_at_ms` is the caller's wall clock in milliseconds since the
/// Unix epoch; combined with the file name it makes the identifier
/// unique for the session. Fails with [`GpxTrackError::NoTrackPoints`]
/// when the document yields zero trackpoints.
pub fn assemble_track(
    file_name: &str,
    raw_text: &str,
    created_at_ms: f64,
) -> Result<Track, GpxTrackError> {
    let doc = parser::parse_document(raw_text)?;
    if doc.points.is_empty() {
        return Err(GpxTrackError::NoTrackPoints {
            file_name: file_name.to_string(),
        });
    }

    let name = doc
        .name
        .unwrap_or_else(|| strip_gpx_suffix(file_name).to_string());

    Ok(Track {
        id: format!("{file_name}-{}", created_at_ms as u64),
        name,
        coordinates: doc.points.iter().map(|p| [p.lat, p.lon]).collect(),
        elevations: doc.points.iter().map(|p| p.ele).collect(),
        elevation_profile: metrics::elevation_profile(&doc.points),
        distance: metrics::total_distance_km(&doc.points),
        elevation_gain: metrics::elevation_gain(&doc.points),
        elevation_loss: metrics::elevation_loss(&doc.points),
        elevation_range: metrics::elevation_range(&doc.points),
        duration: metrics::duration_minutes(&doc.points),
        color: TrackColor::ThemeDefault,
        visible: true,
    })
}

/// Strip a case-insensitive `.gpx` suffix for the display-name fallback.
/// Byte-level comparison keeps this safe for non-ASCII file names.
fn strip_gpx_suffix(file_name: &str) -> &str {
    let bytes = file_name.as_bytes();
    if bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".gpx") {
        &file_name[..file_name.len() - 4]
    } else {
        file_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_POINT_GPX: &str = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk>
    <trkseg>
      <trkpt lat="45.5" lon="-122.5"><ele>100</ele></trkpt>
      <trkpt lat="45.51" lon="-122.51"><ele>110</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_assemble_basic() {
        let track = assemble_track("hike.gpx", TWO_POINT_GPX, 1_700_000_000_000.0).unwrap();
        assert_eq!(track.id, "hike.gpx-1700000000000");
        assert_eq!(track.name, "hike");
        assert_eq!(track.coordinates.len(), 2);
        assert_eq!(track.elevations, vec![Some(100.0), Some(110.0)]);
        assert_eq!(track.elevation_profile.len(), 2);
        assert!(track.distance > 0.0);
        assert!((track.elevation_gain - 10.0).abs() < 1e-9);
        assert_eq!(track.elevation_loss, 0.0);
        assert_eq!(track.elevation_range, Some(10.0));
        assert_eq!(track.duration, None);
        assert_eq!(track.color, TrackColor::ThemeDefault);
        assert!(track.visible);
    }

    #[test]
    fn test_document_name_wins_over_file_name() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk>
    <name>Ridge Loop</name>
    <trkseg><trkpt lat="45.5" lon="-122.5"/></trkseg>
  </trk>
</gpx>"#;
        let track = assemble_track("export-01.gpx", xml, 0.0).unwrap();
        assert_eq!(track.name, "Ridge Loop");
    }

    #[test]
    fn test_file_name_fallback_strips_suffix_case_insensitively() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk><trkseg><trkpt lat="45.5" lon="-122.5"/></trkseg></trk>
</gpx>"#;
        let track = assemble_track("Morning Walk.GPX", xml, 0.0).unwrap();
        assert_eq!(track.name, "Morning Walk");
    }

    #[test]
    fn test_file_name_fallback_handles_non_ascii() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk><trkseg><trkpt lat="25.0" lon="121.5"/></trkseg></trk>
</gpx>"#;
        let track = assemble_track("象山步道.gpx", xml, 0.0).unwrap();
        assert_eq!(track.name, "象山步道");
        let track = assemble_track("象山步道", xml, 0.0).unwrap();
        assert_eq!(track.name, "象山步道");
    }

    #[test]
    fn test_no_track_points_error_names_file() {
        let xml = r#"<?xml version="1.0"?><gpx version="1.1"><trk><trkseg></trkseg></trk></gpx>"#;
        let err = assemble_track("empty.gpx", xml, 0.0).unwrap_err();
        match err {
            GpxTrackError::NoTrackPoints { file_name } => assert_eq!(file_name, "empty.gpx"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_coordinates_and_elevations_stay_aligned() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk>
    <trkseg>
      <trkpt lat="45.5" lon="-122.5"><ele>100</ele></trkpt>
      <trkpt lat="45.51" lon="-122.51"/>
      <trkpt lat="45.52" lon="-122.52"><ele>120</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;
        let track = assemble_track("t.gpx", xml, 0.0).unwrap();
        assert_eq!(track.coordinates.len(), track.elevations.len());
        assert_eq!(track.elevations[1], None);
        // The elevation-free point is missing from the profile but kept
        // in the geometry.
        assert_eq!(track.elevation_profile.len(), 2);
        assert_eq!(track.coordinates.len(), 3);
    }

    #[test]
    fn test_single_point_track_stats() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk><trkseg><trkpt lat="45.5" lon="-122.5"><ele>7</ele></trkpt></trkseg></trk>
</gpx>"#;
        let track = assemble_track("one.gpx", xml, 0.0).unwrap();
        assert_eq!(track.distance, 0.0);
        assert_eq!(track.elevation_gain, 0.0);
        assert_eq!(track.elevation_loss, 0.0);
        assert_eq!(track.duration, None);
        assert_eq!(track.elevation_profile.len(), 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let track = assemble_track("hike.gpx", TWO_POINT_GPX, 0.0).unwrap();
        let json = serde_json::to_value(&track).unwrap();
        assert!(json.get("elevationGain").is_some());
        assert!(json.get("elevationProfile").is_some());
        assert_eq!(json["color"], "themeDefault");
        assert_eq!(json["visible"], true);
    }
}
