use serde::Serialize;

use crate::gpx_types::TrackPoint;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// One point of a distance-indexed elevation chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevationSample {
    /// Cumulative distance from the track start, in kilometers.
    pub distance: f64,
    /// Elevation in meters.
    pub elevation: f64,
}

/// Great-circle distance between two points in kilometers (haversine).
pub fn haversine_km(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Total path length in kilometers. 0 or 1 points yield 0.
pub fn total_distance_km(points: &[TrackPoint]) -> f64 {
    points.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum()
}

/// Sum of positive elevation deltas in meters.
/// A pair contributes only when both sides carry an elevation; pairs
/// straddling an elevation gap are skipped, not bridged.
pub fn elevation_gain(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .filter_map(|w| match (w[0].ele, w[1].ele) {
            (Some(prev), Some(curr)) if curr > prev => Some(curr - prev),
            _ => None,
        })
        .sum()
}

/// Sum of absolute negative elevation deltas in meters, under the same
/// pair rule as [`elevation_gain`].
pub fn elevation_loss(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .filter_map(|w| match (w[0].ele, w[1].ele) {
            (Some(prev), Some(curr)) if curr < prev => Some(prev - curr),
            _ => None,
        })
        .sum()
}

/// Max minus min over all defined elevations, in meters.
/// None when no point carries an elevation.
pub fn elevation_range(points: &[TrackPoint]) -> Option<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;

    for ele in points.iter().filter_map(|p| p.ele) {
        min = min.min(ele);
        max = max.max(ele);
        seen = true;
    }

    seen.then_some(max - min)
}

/// Elapsed minutes between the first-in-order and last-in-order
/// timestamped points. None when fewer than two points carry a
/// timestamp, or when the trailing timestamp precedes the leading one
/// (a backwards clock is treated the same as an absent one).
pub fn duration_minutes(points: &[TrackPoint]) -> Option<f64> {
    let first_idx = points.iter().position(|p| p.time.is_some())?;
    let last_idx = points.iter().rposition(|p| p.time.is_some())?;
    if first_idx == last_idx {
        return None;
    }

    let first = points[first_idx].time?;
    let last = points[last_idx].time?;
    let elapsed_ms = last.signed_duration_since(first).num_milliseconds();
    if elapsed_ms < 0 {
        return None;
    }

    Some(elapsed_ms as f64 / 60_000.0)
}

/// Distance-indexed elevation samples for charting.
///
/// Every consecutive pair advances the cumulative distance, whether or
/// not either point carries an elevation; only elevation-bearing points
/// emit a sample. The first point's distance is 0.
pub fn elevation_profile(points: &[TrackPoint]) -> Vec<ElevationSample> {
    let mut samples = Vec::new();
    let mut cumulative = 0.0;

    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            cumulative += haversine_km(&points[i - 1], point);
        }
        if let Some(elevation) = point.ele {
            samples.push(ElevationSample {
                distance: cumulative,
                elevation,
            });
        }
    }

    samples
}
