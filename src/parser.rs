use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::GpxTrackError;
use crate::gpx_types::{GpxDocument, TrackPoint};

type Result<T> = std::result::Result<T, GpxTrackError>;

/// Parse a GPX XML string into a GpxDocument.
///
/// Trackpoints from every <trk>/<trkseg> are collected in document order;
/// segment boundaries are not preserved. The document name prefers the
/// first <trk><name> over <metadata><name>.
pub fn parse_document(xml: &str) -> Result<GpxDocument> {
    let mut reader = Reader::from_str(xml);
    let mut points = Vec::new();
    let mut track_name: Option<String> = None;
    let mut metadata_name: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"metadata" => {
                    let name = parse_metadata(&mut reader)?;
                    if metadata_name.is_none() {
                        metadata_name = name;
                    }
                }
                b"trk" => parse_track(&mut reader, &mut points, &mut track_name)?,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(GpxDocument {
        name: track_name.or(metadata_name),
        points,
    })
}

/// Parse a <metadata> element, returning its <name> if present.
fn parse_metadata<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Option<String>> {
    let mut name: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => {
                    let text = read_text_owned(reader, &e)?;
                    if name.is_none() && !text.is_empty() {
                        name = Some(text);
                    }
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(GpxTrackError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"metadata" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(name)
}

/// Parse a <trk> element, appending its trackpoints to `points`.
/// The first named track wins the document name.
fn parse_track<'a>(
    reader: &mut Reader<&'a [u8]>,
    points: &mut Vec<TrackPoint>,
    track_name: &mut Option<String>,
) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => {
                    let text = read_text_owned(reader, &e)?;
                    if track_name.is_none() && !text.is_empty() {
                        *track_name = Some(text);
                    }
                }
                b"trkseg" => parse_segment(reader, points)?,
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(GpxTrackError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trk" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(())
}

/// Parse a <trkseg> element.
fn parse_segment<'a>(reader: &mut Reader<&'a [u8]>, points: &mut Vec<TrackPoint>) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"trkpt" => {
                    if let Some(pt) = parse_point(&e, reader)? {
                        points.push(pt);
                    }
                }
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(GpxTrackError::XmlParse)?;
                }
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"trkpt" {
                    if let Ok((lat, lon)) = parse_lat_lon(&e) {
                        points.push(TrackPoint::new(lat, lon));
                    }
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trkseg" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(())
}

/// Parse lat/lon attributes from a trackpoint's start tag.
fn parse_lat_lon(e: &BytesStart<'_>) -> Result<(f64, f64)> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| GpxTrackError::XmlParse(e.into()))?;
        let key = attr.key.local_name();
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        match key.as_ref() {
            b"lat" => {
                lat = Some(val.parse::<f64>().map_err(|_| {
                    GpxTrackError::InvalidAttribute {
                        element: "trkpt",
                        attribute: "lat",
                        value: val.to_string(),
                    }
                })?);
            }
            b"lon" => {
                lon = Some(val.parse::<f64>().map_err(|_| {
                    GpxTrackError::InvalidAttribute {
                        element: "trkpt",
                        attribute: "lon",
                        value: val.to_string(),
                    }
                })?);
            }
            _ => {}
        }
    }

    let lat = lat.ok_or(GpxTrackError::MissingAttribute {
        element: "trkpt",
        attribute: "lat",
    })?;
    let lon = lon.ok_or(GpxTrackError::MissingAttribute {
        element: "trkpt",
        attribute: "lon",
    })?;

    Ok((lat, lon))
}

/// Parse a <trkpt> element and its children.
/// Called after receiving Event::Start for the trkpt element.
///
/// A point whose lat/lon is missing or non-numeric is skipped entirely
/// rather than defaulted: a fabricated 0.0/0.0 point would corrupt the
/// distance and bounds of the whole track.
fn parse_point<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
) -> Result<Option<TrackPoint>> {
    let (lat, lon) = match parse_lat_lon(start) {
        Ok(coords) => coords,
        Err(_) => {
            reader
                .read_to_end(start.name())
                .map_err(GpxTrackError::XmlParse)?;
            return Ok(None);
        }
    };

    let mut point = TrackPoint::new(lat, lon);
    let end_name = start.name().0.to_vec(); // own the end tag name for comparison

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"ele" => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(GpxTrackError::XmlParse)?;
                    point.ele = text.trim().parse::<f64>().ok();
                }
                b"time" => {
                    let text = read_text_owned(reader, &e)?;
                    point.time = DateTime::parse_from_rfc3339(text.trim())
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc));
                }
                _ => {
                    // Skip unknown/extensions elements
                    reader
                        .read_to_end(e.name())
                        .map_err(GpxTrackError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(Some(point))
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references (Event::GeneralRef).
fn read_text_owned<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'_>,
) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                let raw = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                text.push_str(raw);
            }
            Ok(Event::CData(e)) => {
                let s = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                text.push_str(s);
            }
            Ok(Event::GeneralRef(e)) => {
                // Handle character references (&#60; &#x3C;) and predefined entities
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    let name = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                    match name {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {} // Unknown entity, skip
                    }
                }
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(GpxTrackError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(text)
}
