//! Book fixtures driving a simulated reading session

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::{ChapterSummary, ReaderSettings, SettingsPatch};
use serde::Deserialize;

/// A whole simulated session: the book, the viewport and what the reader does
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub viewport: Viewport,

    #[serde(default)]
    pub settings: ReaderSettings,

    pub chapters: Vec<FixtureChapter>,

    #[serde(default)]
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A chapter plus the width its content measures at the default typography
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureChapter {
    #[serde(flatten)]
    pub summary: ChapterSummary,

    pub content_width: f64,
}

/// One reader or host action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Next,
    Prev,
    Page { page: i64 },
    Start,
    End,
    Forward,
    Backward,
    NextChapter,
    PrevChapter,
    Chapter { index: usize },
    ChapterId { id: String },
    Resize { width: f64, height: f64 },
    Settings(SettingsPatch),
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing fixture {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn summaries(&self) -> Vec<ChapterSummary> {
        self.chapters.iter().map(|chapter| chapter.summary.clone()).collect()
    }
}
