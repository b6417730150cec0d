use thiserror::Error;

/// Errors that can occur while building or re-laying out a reading position
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("effective page width must be positive (container width {container_width}, margin {margin})")]
    NonPositivePageWidth { container_width: f64, margin: f64 },

    #[error("book has no chapters")]
    EmptyBook,

    #[error("invalid pagination setting `{field}`: {value}")]
    InvalidSetting { field: &'static str, value: f64 },

    #[error("chapter surface error: {0:#}")]
    Surface(anyhow::Error),
}

impl ReaderError {
    /// Configuration errors are fatal to the component being built and never retried
    pub fn is_configuration(&self) -> bool {
        !matches!(self, ReaderError::Surface(_))
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
