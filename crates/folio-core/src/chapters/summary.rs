use serde::{Deserialize, Serialize};

/// Identity and ordering metadata for one chapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterSummary {
    /// Unique chapter identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Position in the canonical reading sequence
    pub order: i32,

    /// Estimated word count (not authoritative)
    #[serde(default)]
    pub word_count: u32,
}

impl ChapterSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: i32, word_count: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order,
            word_count,
        }
    }
}
