//! Simulated rendering surface
//!
//! Stands in for a host renderer: chapter content has a known width at the
//! default typography and grows linearly with font size and line height.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use folio_core::{ChapterSummary, ChapterSurface, LayoutMeasurements, PageSurface, ReaderSettings};
use parking_lot::RwLock;
use tracing::trace;

use crate::fixture::{Fixture, Viewport};

/// Viewport shared between the host and the surface, as a real container would be
pub type SharedViewport = Arc<RwLock<Viewport>>;

pub struct SimSurface {
    viewport: SharedViewport,
    widths: HashMap<String, f64>,
    chapter: Option<String>,
    scale: f64,
}

impl SimSurface {
    pub fn new(viewport: SharedViewport, widths: HashMap<String, f64>) -> Self {
        Self {
            viewport,
            widths,
            chapter: None,
            scale: 1.0,
        }
    }

    pub fn from_fixture(fixture: &Fixture, viewport: SharedViewport) -> Self {
        let widths = fixture
            .chapters
            .iter()
            .map(|chapter| (chapter.summary.id.clone(), chapter.content_width))
            .collect();
        Self::new(viewport, widths)
    }

    fn typography_scale(settings: &ReaderSettings) -> f64 {
        let base = ReaderSettings::default();
        f64::from(settings.font_size / base.font_size) * f64::from(settings.line_height / base.line_height)
    }
}

impl PageSurface for SimSurface {
    fn measure(&self) -> LayoutMeasurements {
        let viewport = *self.viewport.read();
        let content = self
            .chapter
            .as_ref()
            .and_then(|id| self.widths.get(id))
            .copied()
            .unwrap_or(0.0);

        LayoutMeasurements {
            container_width: viewport.width,
            container_height: viewport.height,
            content_scroll_width: content * self.scale,
        }
    }

    fn set_offset(&mut self, offset: f64) {
        // nothing is drawn
        trace!(offset, "translate content");
    }
}

impl ChapterSurface for SimSurface {
    fn render(&mut self, chapter: &ChapterSummary, settings: &ReaderSettings) -> Result<()> {
        if !self.widths.contains_key(&chapter.id) {
            return Err(anyhow!("no content for chapter `{}`", chapter.id));
        }
        self.chapter = Some(chapter.id.clone());
        self.scale = Self::typography_scale(settings);
        Ok(())
    }

    fn restyle(&mut self, settings: &ReaderSettings) -> Result<()> {
        self.scale = Self::typography_scale(settings);
        Ok(())
    }
}
