//! # segmark
//!
//! Markdown segmentation for reading applications: turns a (possibly
//! bilingual) Markdown document into a titled list of chapters, each an
//! ordered list of display segments.
//!
//! ## The Problem
//!
//! A reader app shows text one sentence at a time, optionally with a
//! translation underneath. The source is loosely structured Markdown, often
//! machine-generated, with the translation embedded inline:
//!
//! ```text
//! # The Lost Key / Chìa Khóa Bị Mất
//!
//! ## Chapter 1 / Chương 1
//! It was dark. {Trời tối.} Mr. Lee waited. {Ông Lee đợi.}
//! ```
//!
//! Turning that into segments means answering several questions that sound
//! trivial and are not:
//!
//! - Where does a sentence end? `"Mr. Lee"` is one sentence, `"3.14"` is not
//!   two, `"Wait..."` may or may not end one.
//! - Which translation belongs to which sentence?
//! - Where do chapters start when the generator forgot the title heading?
//!
//! ## Pipeline
//!
//! ```text
//! markdown
//!    │
//!    ▼
//! ChapterSplitter   title (H1 → H3 → first line), H2 chapter breaks
//!    │
//!    ▼
//! SegmentBuilder    paragraph flags, headings, images, lists, quotes
//!    │
//!    ▼
//! clean             footnote markers, whitespace
//!    │
//!    ▼
//! BilingualPairer   {braces} or " / " → per-language text
//!    │
//!    ├──► SentenceSplitter   sentence format
//!    └──► split_phrases      phrase format
//! ```
//!
//! ## The Origin Descriptor
//!
//! | Descriptor | Languages | Format |
//! |------------|-----------|--------|
//! | `en` | English only | sentence |
//! | `en-vi` | English with Vietnamese | sentence |
//! | `en-vi-ph` | English with Vietnamese | phrase |
//!
//! ## Quick Start
//!
//! ```rust
//! let doc = segmark::parse_document(
//!     "# The Lost Key\n\n## Chapter 1\nIt was dark. Mr. Lee waited.",
//!     "en",
//! )?;
//!
//! assert_eq!(doc.title["en"], "The Lost Key");
//! let chapter = &doc.chapters[0];
//! assert_eq!(chapter.segments.len(), 2);
//! assert_eq!(chapter.segments[1].text("en").as_deref(), Some("Mr. Lee waited."));
//! # Ok::<(), segmark::Error>(())
//! ```
//!
//! Bilingual, phrase format:
//!
//! ```rust
//! let segments = segmark::parse_segments("Hello, world. {Xin chào, thế giới.}", "en-vi-ph")?;
//!
//! let content = serde_json::to_value(&segments[0].content).unwrap();
//! assert_eq!(content[0]["en"], "Hello,");
//! assert_eq!(content[1]["vi"], "thế giới.");
//! # Ok::<(), segmark::Error>(())
//! ```
//!
//! ## Reproducible Output
//!
//! Identifiers come from an [`IdGenerator`]. The free functions use random
//! UUIDs; use [`Parser`] with [`SequentialIds`] for deterministic output.
//!
//! ## Logging
//!
//! Decisions are reported through `tracing` (`debug` per document, `trace`
//! per line, `warn` for recovered malformed input). No subscriber is
//! installed by this crate.

mod bilingual;
mod chapter;
mod clean;
mod config;
mod content;
mod dialog;
mod error;
mod ids;
pub mod markdown;
mod origin;
mod parser;
mod phrase;
mod segment;
mod sentence;

use std::sync::Arc;

pub use bilingual::{align_phrases, brace_runs, split_slash, BilingualPairer, Run};
pub use chapter::{Chapter, ChapterSplitter, ChapterStats, Document};
pub use clean::{clean, normalize_whitespace, strip_footnotes};
pub use config::{ParserConfig, DEFAULT_CHAPTER_TITLE, DEFAULT_WORDS_PER_MINUTE};
pub use content::{text_map, Content, PhraseMap, TextMap};
pub use dialog::is_dialog;
pub use error::{Error, Result};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use origin::{BilingualFormat, Origin};
pub use parser::Parser;
pub use phrase::split_phrases;
pub use segment::{Segment, SegmentBuilder, SegmentMetadata, SegmentType};
pub use sentence::{split_sentences, SentenceSplitter, TITLE_ABBREVIATIONS};

/// Parse a Markdown document with default configuration and UUID identifiers.
///
/// # Errors
///
/// Returns [`Error::EmptyPrimaryLanguage`] if `origin` has no primary
/// language. Parsing itself never fails.
pub fn parse_document(markdown: &str, origin: &str) -> Result<Document> {
    let origin: Origin = origin.parse()?;
    Ok(Parser::new(Arc::new(UuidIds)).parse_document(markdown, &origin))
}

/// Parse a block of text into segments with default configuration and UUID
/// identifiers.
///
/// # Errors
///
/// Returns [`Error::EmptyPrimaryLanguage`] if `origin` has no primary
/// language.
pub fn parse_segments(text: &str, origin: &str) -> Result<Vec<Segment>> {
    let origin: Origin = origin.parse()?;
    Ok(Parser::new(Arc::new(UuidIds)).parse_segments(text, &origin))
}
