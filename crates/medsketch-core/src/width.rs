//! Stroke width values and the toolbar presets.

use crate::error::{SketchError, SketchResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated stroke width: always positive and finite.
///
/// Construction is the only place widths are checked, so everything past the
/// UI boundary can take a `StrokeWidth` without re-validating.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct StrokeWidth(f64);

impl StrokeWidth {
    /// Width of a freshly created store (matches the small preset).
    pub const DEFAULT: Self = Self(1.0);

    /// Validate a raw width.
    pub fn new(width: f64) -> SketchResult<Self> {
        if width.is_finite() && width > 0.0 {
            Ok(Self(width))
        } else {
            Err(SketchError::InvalidWidth(width))
        }
    }

    /// The width in surface units.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for StrokeWidth {
    type Error = SketchError;

    fn try_from(width: f64) -> SketchResult<Self> {
        Self::new(width)
    }
}

impl From<StrokeWidth> for f64 {
    fn from(width: StrokeWidth) -> Self {
        width.0
    }
}

impl From<WidthPreset> for StrokeWidth {
    fn from(preset: WidthPreset) -> Self {
        preset.width()
    }
}

impl fmt::Display for StrokeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three pen sizes offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum WidthPreset {
    #[default]
    Small,
    Medium,
    Large,
}

impl WidthPreset {
    /// All presets, thinnest first.
    pub const ALL: [WidthPreset; 3] = [WidthPreset::Small, WidthPreset::Medium, WidthPreset::Large];

    /// Stroke width for this preset.
    pub fn width(self) -> StrokeWidth {
        match self {
            WidthPreset::Small => StrokeWidth(1.0),
            WidthPreset::Medium => StrokeWidth(3.0),
            WidthPreset::Large => StrokeWidth(5.0),
        }
    }

    /// Display name for this preset.
    pub fn name(self) -> &'static str {
        match self {
            WidthPreset::Small => "Small",
            WidthPreset::Medium => "Medium",
            WidthPreset::Large => "Large",
        }
    }

    /// Keyboard key that selects this preset.
    pub fn shortcut(self) -> &'static str {
        match self {
            WidthPreset::Small => "1",
            WidthPreset::Medium => "2",
            WidthPreset::Large => "3",
        }
    }

    /// Find the preset whose width matches `width` exactly, if any.
    pub fn from_width(width: StrokeWidth) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.width() == width)
    }
}

impl fmt::Display for WidthPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
