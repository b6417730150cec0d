//! Whole-book progress
//!
//! Every chapter occupies an equal `1 / total_chapters` slice of the book, and
//! the position inside the active chapter fills its slice page by page.

/// Blend chapter and page position into a single `[0, 1]` fraction.
///
/// Returns `0.0` when no book is loaded (`total_chapters <= 0`). A chapter with
/// a single page counts as fully read, since it has no internal position.
pub fn overall_progress(
    chapter_index: i64,
    page_index: i64,
    pages_in_chapter: i64,
    total_chapters: i64,
) -> f64 {
    if total_chapters <= 0 {
        return 0.0;
    }

    let chapter_progress = if pages_in_chapter <= 1 {
        1.0
    } else {
        (page_index as f64 / (pages_in_chapter - 1) as f64).clamp(0.0, 1.0)
    };

    ((chapter_index as f64 + chapter_progress) / total_chapters as f64).clamp(0.0, 1.0)
}
