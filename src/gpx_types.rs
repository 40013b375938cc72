use chrono::{DateTime, Utc};

/// One recorded trackpoint (<trkpt>).
#[derive(Debug, Clone)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ele: None,
            time: None,
        }
    }
}

/// A parsed GPX document, reduced to what the viewer consumes:
/// every trackpoint in document order (segment boundaries flattened)
/// plus the display name, if the document carries one.
#[derive(Debug, Default)]
pub struct GpxDocument {
    pub name: Option<String>,
    pub points: Vec<TrackPoint>,
}
