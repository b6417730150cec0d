//! Reading position engine
//!
//! Turns a chapter rendered by the host into discrete pages, keeps track of
//! the chapter being read, and blends both into a single whole-book progress
//! value that is republished after every change.

pub mod chapters;
pub mod error;
pub mod navigation;
pub mod pagination;
pub mod progress;
pub mod settings;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use chapters::{ChapterSequencer, ChapterSummary};
pub use error::{ReaderError, Result};
pub use navigation::{
    ChapterSurface, PageMove, PositionHandler, PositionSubscriber, ReadingEngine, ReadingPosition,
};
pub use pagination::{
    LayoutMeasurements, PageLayout, PageState, PageSurface, PageTarget, PaginationConfig, Paginator,
};
pub use progress::overall_progress;
pub use settings::{ReaderSettings, ReadingMode, SettingsPatch, ThemeName};
