//! Parser configuration.
//!
//! Everything here has a sensible default; most callers never touch it.
//!
//! ```rust
//! use segmark::ParserConfig;
//!
//! let config = ParserConfig::default()
//!     .with_words_per_minute(250)
//!     .unwrap()
//!     .with_default_chapter_title("Part 1");
//! assert_eq!(config.words_per_minute(), 250);
//!
//! let config = ParserConfig::from_json(r#"{ "keepSubheadings": true }"#).unwrap();
//! assert!(config.keep_subheadings());
//! assert_eq!(config.words_per_minute(), 200);
//! ```

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Average silent reading speed used for `estimated_reading_time`.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Title of the synthetic chapter used when a document has no chapter
/// headings.
pub const DEFAULT_CHAPTER_TITLE: &str = "Chapter 1";

/// Tunables for [`Parser`](crate::Parser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    words_per_minute: u32,
    default_chapter_title: String,
    keep_subheadings: bool,
    slash_single_line: bool,
}

impl ParserConfig {
    /// Decode a config from JSON, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed JSON and
    /// [`Error::InvalidWordsPerMinute`] for a zero reading speed.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Reading speed for chapter statistics.
    #[must_use]
    pub const fn words_per_minute(&self) -> u32 {
        self.words_per_minute
    }

    /// Title given to the synthetic chapter of a heading-less document.
    #[must_use]
    pub fn default_chapter_title(&self) -> &str {
        &self.default_chapter_title
    }

    /// Whether level 3+ headings inside a chapter become `heading` segments
    /// instead of being skipped.
    #[must_use]
    pub const fn keep_subheadings(&self) -> bool {
        self.keep_subheadings
    }

    /// Whether a single-line block may use the `primary / secondary`
    /// convention.
    #[must_use]
    pub const fn slash_single_line(&self) -> bool {
        self.slash_single_line
    }

    /// Set the reading speed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWordsPerMinute`] if `wpm == 0`.
    pub fn with_words_per_minute(self, wpm: u32) -> Result<Self> {
        Self {
            words_per_minute: wpm,
            ..self
        }
        .validate()
    }

    /// Set the synthetic chapter title.
    #[must_use]
    pub fn with_default_chapter_title(self, title: impl Into<String>) -> Self {
        Self {
            default_chapter_title: title.into(),
            ..self
        }
    }

    /// Keep or skip sub-headings.
    #[must_use]
    pub fn with_keep_subheadings(self, keep: bool) -> Self {
        Self {
            keep_subheadings: keep,
            ..self
        }
    }

    /// Allow or forbid the slash convention for single-line blocks.
    #[must_use]
    pub fn with_slash_single_line(self, allow: bool) -> Self {
        Self {
            slash_single_line: allow,
            ..self
        }
    }

    /// Minutes needed to read `words` words, rounded up.
    #[must_use]
    pub fn reading_minutes(&self, words: usize) -> usize {
        words.div_ceil(self.words_per_minute.max(1) as usize)
    }

    fn validate(self) -> Result<Self> {
        if self.words_per_minute == 0 {
            Err(Error::InvalidWordsPerMinute(self.words_per_minute))
        } else {
            Ok(self)
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            default_chapter_title: DEFAULT_CHAPTER_TITLE.to_string(),
            keep_subheadings: false,
            slash_single_line: true,
        }
    }
}
