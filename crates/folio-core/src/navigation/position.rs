use crate::pagination::PageState;
use serde::{Deserialize, Serialize};

/// Where the reader is in the whole book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingPosition {
    /// Index of the active chapter in canonical order
    pub chapter_index: usize,

    /// Id of the active chapter
    pub chapter_id: String,

    pub total_chapters: usize,

    /// Page position inside the active chapter
    pub page: PageState,

    /// Whole-book progress in `[0, 1]`
    pub overall_progress: f64,

    pub is_first_chapter: bool,
    pub is_last_chapter: bool,
}

impl ReadingPosition {
    /// First page of the first chapter
    pub fn at_book_start(&self) -> bool {
        self.is_first_chapter && self.page.is_first_page
    }

    /// Last page of the last chapter
    pub fn at_book_end(&self) -> bool {
        self.is_last_chapter && self.page.is_last_page
    }
}
