use crate::chapters::ChapterSummary;
use crate::pagination::PageSurface;
use crate::settings::ReaderSettings;

mod engine;
mod position;
mod subscriber;

pub use engine::{PositionHandler, ReadingEngine};
pub use position::ReadingPosition;
pub use subscriber::PositionSubscriber;

/// The host surface a book is rendered into.
///
/// Rendering and styling are the host's job; the engine only asks for them
/// and then measures the result.
pub trait ChapterSurface: PageSurface {
    /// Replace the surface content with `chapter`, laid out with `settings`
    fn render(&mut self, chapter: &ChapterSummary, settings: &ReaderSettings) -> anyhow::Result<()>;

    /// Re-apply `settings` to the content already rendered
    fn restyle(&mut self, settings: &ReaderSettings) -> anyhow::Result<()>;
}

/// Page-level navigation request inside the active chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    Next,
    Prev,
    To(i64),
    Start,
    End,
}
