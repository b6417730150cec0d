//! Surface doubles for unit tests

use crate::chapters::ChapterSummary;
use crate::navigation::ChapterSurface;
use crate::pagination::{LayoutMeasurements, PageSurface};
use crate::settings::ReaderSettings;
use std::collections::HashMap;

/// A content strip with fixed extents
#[derive(Debug, Clone)]
pub struct StripSurface {
    pub container_width: f64,
    pub content_scroll_width: f64,
    pub offset: f64,
}

impl StripSurface {
    pub fn new(container_width: f64, content_scroll_width: f64) -> Self {
        Self {
            container_width,
            content_scroll_width,
            offset: f64::NAN,
        }
    }
}

impl PageSurface for StripSurface {
    fn measure(&self) -> LayoutMeasurements {
        LayoutMeasurements {
            container_width: self.container_width,
            container_height: 600.0,
            content_scroll_width: self.content_scroll_width,
        }
    }

    fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }
}

/// A book surface whose content widths scale with font size and line height
#[derive(Debug, Clone)]
pub struct BookSurface {
    pub container_width: f64,
    /// Content width per chapter id at the default typography
    pub widths: HashMap<String, f64>,
    pub chapter: Option<String>,
    pub scale: f64,
    pub offset: f64,
    pub restyles: usize,
    /// Rendering this chapter id fails
    pub fail_on: Option<String>,
}

impl BookSurface {
    pub fn new(container_width: f64) -> Self {
        Self {
            container_width,
            widths: HashMap::new(),
            chapter: None,
            scale: 1.0,
            offset: 0.0,
            restyles: 0,
            fail_on: None,
        }
    }

    pub fn with_chapter(mut self, id: &str, width: f64) -> Self {
        self.widths.insert(id.to_string(), width);
        self
    }

    fn scale_for(settings: &ReaderSettings) -> f64 {
        let defaults = ReaderSettings::default();
        (settings.font_size / defaults.font_size) as f64 * (settings.line_height / defaults.line_height) as f64
    }
}

impl PageSurface for BookSurface {
    fn measure(&self) -> LayoutMeasurements {
        let width = self
            .chapter
            .as_ref()
            .and_then(|id| self.widths.get(id))
            .copied()
            .unwrap_or(0.0);

        LayoutMeasurements {
            container_width: self.container_width,
            container_height: 600.0,
            content_scroll_width: width * self.scale,
        }
    }

    fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }
}

impl ChapterSurface for BookSurface {
    fn render(&mut self, chapter: &ChapterSummary, settings: &ReaderSettings) -> anyhow::Result<()> {
        if self.fail_on.as_deref() == Some(chapter.id.as_str()) {
            anyhow::bail!("no content for chapter {}", chapter.id);
        }
        self.chapter = Some(chapter.id.clone());
        self.scale = Self::scale_for(settings);
        Ok(())
    }

    fn restyle(&mut self, settings: &ReaderSettings) -> anyhow::Result<()> {
        self.scale = Self::scale_for(settings);
        self.restyles += 1;
        Ok(())
    }
}
