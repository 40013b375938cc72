use serde::Deserialize;

use crate::track::TrackColor;

/// The two palettes the viewer ships. Selection is owned by the UI and
/// passed in explicitly wherever a concrete color is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Light,
    Dark,
}

/// Track colors of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub track_default: &'static str,
    pub track_hover: &'static str,
    pub track_focus: &'static str,
}

impl ThemeKind {
    pub fn palette(self) -> Palette {
        match self {
            ThemeKind::Light => Palette {
                track_default: "#6B7280",
                track_hover: "#D97706",
                track_focus: "#059669",
            },
            ThemeKind::Dark => Palette {
                track_default: "#9CA3AF",
                track_hover: "#FBBF24",
                track_focus: "#F87171",
            },
        }
    }
}

/// Resolve a track's color tag against a theme.
pub fn resolve_color(color: TrackColor, theme: ThemeKind) -> &'static str {
    match color {
        TrackColor::ThemeDefault => theme.palette().track_default,
    }
}
