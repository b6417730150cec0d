//! Chapter sequencing
//!
//! Keeps the canonical chapter order of a loaded book and the index of the
//! chapter being read. Out-of-range targets are rejected, never clamped.

mod summary;

pub use summary::ChapterSummary;

use crate::error::{ReaderError, Result};
use tracing::{debug, warn};

/// Ordered chapters of one book and the current position among them
#[derive(Debug, Clone)]
pub struct ChapterSequencer {
    chapters: Vec<ChapterSummary>,
    current: usize,
}

impl ChapterSequencer {
    /// Build a sequencer from chapters in any order.
    ///
    /// Chapters are sorted by `order` once; ties keep their supplied order.
    pub fn new(mut chapters: Vec<ChapterSummary>) -> Result<Self> {
        if chapters.is_empty() {
            warn!("refusing to sequence an empty chapter list");
            return Err(ReaderError::EmptyBook);
        }

        // sort_by_key is stable
        chapters.sort_by_key(|chapter| chapter.order);

        Ok(Self {
            chapters,
            current: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Always false, an empty book never constructs
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_chapter(&self) -> &ChapterSummary {
        &self.chapters[self.current]
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.chapters.len()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    /// Move to the following chapter; `false` at the last chapter
    pub fn go_to_next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        debug!(chapter = self.current, "advanced to next chapter");
        true
    }

    /// Move to the preceding chapter; `false` at the first chapter
    pub fn go_to_prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current -= 1;
        debug!(chapter = self.current, "moved back to previous chapter");
        true
    }

    /// Jump to an index in canonical order, rejecting anything out of range
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.chapters.len() {
            warn!(index, total = self.chapters.len(), "chapter index out of range");
            return false;
        }
        self.current = index;
        true
    }

    /// Jump to the chapter with the given id
    pub fn go_to_id(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) => self.go_to(index),
            None => {
                warn!(id, "unknown chapter id");
                false
            }
        }
    }

    /// Resolve a chapter id to its index in canonical order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.chapters.iter().position(|chapter| chapter.id == id)
    }

    pub fn chapter(&self, index: usize) -> Option<&ChapterSummary> {
        self.chapters.get(index)
    }

    /// All chapters, sorted by `order`
    pub fn chapters(&self) -> &[ChapterSummary] {
        &self.chapters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chapters() -> Vec<ChapterSummary> {
        vec![
            ChapterSummary::new("ch-0", "Preface", 0, 500),
            ChapterSummary::new("ch-1", "Chapter 1", 1, 3000),
            ChapterSummary::new("ch-2", "Chapter 2", 2, 2500),
            ChapterSummary::new("ch-3", "Chapter 3", 3, 4000),
        ]
    }

    fn ids(sequencer: &ChapterSequencer) -> Vec<&str> {
        sequencer.chapters().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_starts_at_first_chapter() {
        let sequencer = ChapterSequencer::new(sample_chapters()).unwrap();
        assert_eq!(sequencer.len(), 4);
        assert_eq!(sequencer.current_index(), 0);
        assert_eq!(sequencer.current_chapter().id, "ch-0");
    }

    #[test]
    fn test_empty_book_is_rejected() {
        let err = ChapterSequencer::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ReaderError::EmptyBook));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_next_and_prev() {
        let mut sequencer = ChapterSequencer::new(sample_chapters()).unwrap();
        assert!(sequencer.go_to_next());
        assert_eq!(sequencer.current_index(), 1);

        assert!(sequencer.go_to(2));
        assert!(sequencer.go_to_prev());
        assert_eq!(sequencer.current_index(), 1);
    }

    #[test]
    fn test_boundaries_do_not_wrap() {
        let mut sequencer = ChapterSequencer::new(sample_chapters()).unwrap();
        assert!(!sequencer.has_prev());
        assert!(sequencer.has_next());
        assert!(!sequencer.go_to_prev());
        assert_eq!(sequencer.current_index(), 0);

        assert!(sequencer.go_to(3));
        assert!(sequencer.has_prev());
        assert!(!sequencer.has_next());
        assert!(!sequencer.go_to_next());
        assert_eq!(sequencer.current_index(), 3);
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut sequencer = ChapterSequencer::new(sample_chapters()).unwrap();
        sequencer.go_to(2);
        assert!(!sequencer.go_to(4));
        assert!(!sequencer.go_to(usize::MAX));
        assert_eq!(sequencer.current_index(), 2);
        assert_eq!(sequencer.current_chapter().id, "ch-2");
    }

    #[test]
    fn test_go_to_id() {
        let mut sequencer = ChapterSequencer::new(sample_chapters()).unwrap();
        assert!(sequencer.go_to_id("ch-3"));
        assert_eq!(sequencer.current_index(), 3);

        assert!(!sequencer.go_to_id("nonexistent"));
        assert_eq!(sequencer.current_index(), 3);
    }

    #[test]
    fn test_chapter_lookup_out_of_range() {
        let sequencer = ChapterSequencer::new(sample_chapters()).unwrap();
        assert!(sequencer.chapter(10).is_none());
        assert_eq!(sequencer.chapter(1).map(|c| c.title.as_str()), Some("Chapter 1"));
    }

    #[test]
    fn test_sorts_by_order_regardless_of_input() {
        let mut shuffled = sample_chapters();
        shuffled.swap(0, 2);
        shuffled.swap(1, 3);
        let sequencer = ChapterSequencer::new(shuffled).unwrap();
        assert_eq!(sequencer.current_chapter().id, "ch-0");
        assert_eq!(ids(&sequencer), vec!["ch-0", "ch-1", "ch-2", "ch-3"]);

        let mut reversed = sample_chapters();
        reversed.reverse();
        let sequencer = ChapterSequencer::new(reversed).unwrap();
        assert_eq!(ids(&sequencer), vec!["ch-0", "ch-1", "ch-2", "ch-3"]);
    }

    #[test]
    fn test_equal_order_keeps_supplied_order() {
        let sequencer = ChapterSequencer::new(vec![
            ChapterSummary::new("b", "B", 1, 0),
            ChapterSummary::new("a", "A", 1, 0),
            ChapterSummary::new("z", "Z", 0, 0),
        ])
        .unwrap();
        assert_eq!(ids(&sequencer), vec!["z", "b", "a"]);
    }
}
