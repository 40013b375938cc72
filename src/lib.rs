pub mod error;
pub mod gpx_types;
pub mod import;
pub mod metrics;
pub mod parser;
pub mod theme;
pub mod track;

use wasm_bindgen::prelude::*;

use crate::import::FileEntry;
use crate::theme::ThemeKind;
use crate::track::TrackColor;

/// Parse one GPX file into a track record, returned as a JS object.
#[wasm_bindgen(js_name = parseTrack)]
pub fn parse_track(file_name: &str, content: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let track = track::assemble_track(file_name, content, js_sys::Date::now())?;
    serde_wasm_bindgen::to_value(&track).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Import a batch of `{name, content}` files, returned as a JS object
/// with `tracks` and `failures` arrays.
#[wasm_bindgen(js_name = importTracks)]
pub fn import_tracks(files: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let files = parse_files(files)?;
    let outcome = import::import_tracks(&files, js_sys::Date::now());
    serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Same as `importTracks`, returned as a JSON string.
#[wasm_bindgen(js_name = importTracksString)]
pub fn import_tracks_string(files: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let files = parse_files(files)?;
    let outcome = import::import_tracks(&files, js_sys::Date::now());
    serde_json::to_string(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resolve a track's color tag (e.g. `"themeDefault"`) against a theme
/// name (`"light"` or `"dark"`), returning a hex color.
#[wasm_bindgen(js_name = resolveTrackColor)]
pub fn resolve_track_color(color: JsValue, theme: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let color: TrackColor =
        serde_wasm_bindgen::from_value(color).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let theme: ThemeKind =
        serde_wasm_bindgen::from_value(theme).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(theme::resolve_color(color, theme).to_string())
}

fn parse_files(files: JsValue) -> Result<Vec<FileEntry>, JsValue> {
    serde_wasm_bindgen::from_value(files).map_err(|e| JsValue::from_str(&e.to_string()))
}
