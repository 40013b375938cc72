use serde::{Deserialize, Serialize};

use crate::track::{self, Track};

/// One named file handed over by the UI's directory/file picker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub content: String,
}

/// A file that could not be assembled into a track.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    pub file_name: String,
    pub error: String,
}

/// Result of one import batch: every track that assembled plus one
/// failure record per file that did not. A failing file never disturbs
/// its siblings.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub tracks: Vec<Track>,
    pub failures: Vec<ImportFailure>,
}

/// Import a batch of files into track records.
///
/// Entries whose name does not end in `.gpx` (case-insensitive) are
/// silently dropped. The remaining files are mutually independent and
/// assembled one by one; the outcome is only exposed once every file
/// has been processed.
pub fn import_tracks(files: &[FileEntry], created_at_ms: f64) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for file in files.iter().filter(|f| is_gpx_name(&f.name)) {
        match track::assemble_track(&file.name, &file.content, created_at_ms) {
            Ok(track) => outcome.tracks.push(track),
            Err(e) => outcome.failures.push(ImportFailure {
                file_name: file.name.clone(),
                error: e.to_string(),
            }),
        }
    }

    outcome
}

fn is_gpx_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".gpx")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, content: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    const GOOD_GPX: &str = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk>
    <name>Good</name>
    <trkseg>
      <trkpt lat="35.0" lon="139.0"/>
      <trkpt lat="35.001" lon="139.001"/>
    </trkseg>
  </trk>
</gpx>"#;

    const EMPTY_GPX: &str =
        r#"<?xml version="1.0"?><gpx version="1.1"><trk><trkseg></trkseg></trk></gpx>"#;

    #[test]
    fn test_non_gpx_files_silently_dropped() {
        let files = [
            entry("a.gpx", GOOD_GPX),
            entry("notes.txt", "not xml"),
            entry("photo.jpg", ""),
        ];
        let outcome = import_tracks(&files, 0.0);
        assert_eq!(outcome.tracks.len(), 1);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_gpx_extension_match_is_case_insensitive() {
        let files = [entry("RIDE.GPX", GOOD_GPX), entry("walk.Gpx", GOOD_GPX)];
        let outcome = import_tracks(&files, 0.0);
        assert_eq!(outcome.tracks.len(), 2);
    }

    #[test]
    fn test_partial_success_reports_failing_file() {
        let files = [entry("good.gpx", GOOD_GPX), entry("empty.gpx", EMPTY_GPX)];
        let outcome = import_tracks(&files, 0.0);
        assert_eq!(outcome.tracks.len(), 1);
        assert_eq!(outcome.tracks[0].name, "Good");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].file_name, "empty.gpx");
        assert!(outcome.failures[0].error.contains("empty.gpx"));
    }

    #[test]
    fn test_failure_does_not_disturb_later_files() {
        let files = [
            entry("empty.gpx", EMPTY_GPX),
            entry("good.gpx", GOOD_GPX),
        ];
        let outcome = import_tracks(&files, 0.0);
        assert_eq!(outcome.tracks.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let outcome = import_tracks(&[], 0.0);
        assert!(outcome.tracks.is_empty());
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let files = [entry("empty.gpx", EMPTY_GPX)];
        let outcome = import_tracks(&files, 0.0);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["failures"][0]["fileName"], "empty.gpx");
    }
}
