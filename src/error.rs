//! Error types for segmark.
//!
//! Segmentation itself never fails: malformed input degrades toward less
//! structure. Errors only come from caller-supplied configuration.

/// Errors that can occur while configuring a parse.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The origin descriptor has no primary language code.
    #[error("origin descriptor {0:?} has no primary language")]
    EmptyPrimaryLanguage(String),

    /// Reading speed used for chapter statistics must be > 0.
    #[error("invalid reading speed: {0} words per minute (must be > 0)")]
    InvalidWordsPerMinute(u32),

    /// Parser configuration could not be decoded.
    #[error("invalid parser config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for segmark operations.
pub type Result<T> = std::result::Result<T, Error>;
