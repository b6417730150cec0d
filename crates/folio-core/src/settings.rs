//! Reader settings

use crate::error::Result;
use crate::pagination::PaginationConfig;
use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: f32 = 12.0;
pub const MAX_FONT_SIZE: f32 = 36.0;
pub const MIN_LINE_HEIGHT: f32 = 1.2;
pub const MAX_LINE_HEIGHT: f32 = 2.0;

/// Colour theme, passed through to the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeName {
    #[default]
    Light,
    Sepia,
    Dark,
    UltraDark,
}

/// How the host presents a chapter. The engine always paginates; the mode is
/// carried for the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadingMode {
    #[default]
    Paginated,
    Scroll,
}

/// Everything the host may tune about how a chapter is laid out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Font size in surface units
    pub font_size: f32,

    /// Line height as a multiple of the font size
    pub line_height: f32,

    /// Font family name understood by the surface
    pub font_family: String,

    /// Colour theme
    pub theme: ThemeName,

    pub reading_mode: ReadingMode,

    /// Horizontal margin on each side of a page
    pub margin: f64,

    /// Extra space between adjacent pages
    pub gap: f64,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            line_height: 1.6,
            font_family: "serif".to_string(),
            theme: ThemeName::Light,
            reading_mode: ReadingMode::Paginated,
            margin: 20.0,
            gap: 20.0,
        }
    }
}

/// Partial update, typically coming from a settings panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub font_family: Option<String>,
    pub theme: Option<ThemeName>,
    pub reading_mode: Option<ReadingMode>,
    pub margin: Option<f64>,
    pub gap: Option<f64>,
}

impl ReaderSettings {
    /// Pull typography into its supported range
    pub fn normalized(mut self) -> Self {
        self.font_size = clamp_or(self.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE, 18.0);
        self.line_height = clamp_or(self.line_height, MIN_LINE_HEIGHT, MAX_LINE_HEIGHT, 1.6);
        self
    }

    /// Validated pagination inputs
    pub fn pagination(&self) -> Result<PaginationConfig> {
        PaginationConfig::new(self.margin, self.gap)
    }

    /// Whether switching from `self` to `other` changes page geometry
    pub fn affects_layout(&self, other: &ReaderSettings) -> bool {
        self.font_size != other.font_size
            || self.line_height != other.line_height
            || self.font_family != other.font_family
            || self.margin != other.margin
            || self.gap != other.gap
    }

    /// Settings with `patch` applied and normalized
    pub fn patched(&self, patch: &SettingsPatch) -> ReaderSettings {
        let mut next = self.clone();
        if let Some(font_size) = patch.font_size {
            next.font_size = font_size;
        }
        if let Some(line_height) = patch.line_height {
            next.line_height = line_height;
        }
        if let Some(font_family) = &patch.font_family {
            next.font_family = font_family.clone();
        }
        if let Some(theme) = patch.theme {
            next.theme = theme;
        }
        if let Some(reading_mode) = patch.reading_mode {
            next.reading_mode = reading_mode;
        }
        if let Some(margin) = patch.margin {
            next.margin = margin;
        }
        if let Some(gap) = patch.gap {
            next.gap = gap;
        }
        next.normalized()
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
