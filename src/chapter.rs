//! Chapter splitting: from a whole Markdown document to titled chapters.
//!
//! ## The State Machine
//!
//! ```text
//! (ignored preface)       ─┐
//! # The Lost Key           ├─ 1. title: first H1, else first H3, else the
//!                         ─┘     first line with text; earlier lines dropped
//! Some opening words.     ──  4. untitled leading chapter (kept if non-empty)
//! ## Chapter 1            ─┐
//! It was dark.             ├─ 2. every H2 starts a chapter
//! ## Chapter 2            ─┤
//! It was light.           ─┘
//! ```
//!
//! 3. A document with no H2 at all becomes one synthetic chapter titled
//!    `"Chapter 1"` (configurable).
//!
//! 5. A chapter with no segments survives only if its title is non-empty.
//!
//! Each chapter's lines go through [`SegmentBuilder`], so `order` restarts at
//! zero in every chapter and the first segment of each chapter starts a
//! paragraph.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

use crate::bilingual::BilingualPairer;
use crate::clean::clean;
use crate::config::ParserConfig;
use crate::content::TextMap;
use crate::ids::IdGenerator;
use crate::markdown::{classify_line, heading, is_heading_level, LineKind};
use crate::origin::Origin;
use crate::segment::{Segment, SegmentBuilder};

/// Counts derived from a chapter's segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterStats {
    /// Number of segments.
    pub total_segments: usize,
    /// Unicode words in the primary-language text.
    pub total_words: usize,
    /// Minutes, rounded up.
    pub estimated_reading_time: usize,
}

impl ChapterStats {
    /// Compute statistics over `segments` in the `primary` language.
    #[must_use]
    pub fn compute(segments: &[Segment], primary: &str, config: &ParserConfig) -> Self {
        let total_words = segments
            .iter()
            .filter_map(|s| s.text(primary))
            .map(|text| text.unicode_words().count())
            .sum();
        Self {
            total_segments: segments.len(),
            total_words,
            estimated_reading_time: config.reading_minutes(total_words),
        }
    }
}

/// A titled, ordered group of segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Identifier from the [`IdGenerator`].
    pub id: String,
    /// Zero-based, contiguous position in the document.
    pub order: usize,
    /// Title per language. Empty text for an untitled leading chapter.
    pub title: TextMap,
    /// Ordered content.
    pub segments: Vec<Segment>,
    /// Derived counts.
    pub stats: ChapterStats,
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document title per language.
    pub title: TextMap,
    /// Chapters in reading order. May be empty.
    pub chapters: Vec<Chapter>,
}

impl Document {
    /// A document with an empty primary title and no chapters.
    #[must_use]
    pub fn empty(origin: &Origin) -> Self {
        Self {
            title: TextMap::from([(origin.primary().to_string(), String::new())]),
            chapters: Vec::new(),
        }
    }

    /// Total segments across all chapters.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.chapters.iter().map(|c| c.segments.len()).sum()
    }
}

/// Where the document title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleSource {
    H1,
    H3,
    FirstLine,
}

#[derive(Debug)]
struct TitleLine<'a> {
    text: &'a str,
    /// First line of the body after the title.
    body_start: usize,
    source: TitleSource,
}

/// A run of lines under one chapter heading.
struct Span<'a> {
    heading: Option<&'a str>,
    lines: Vec<&'a str>,
}

/// Splits a Markdown document into a title and chapters.
///
/// ## Example
///
/// ```rust
/// use segmark::{BilingualPairer, ChapterSplitter, ParserConfig, SequentialIds};
///
/// let pairer = BilingualPairer::new("en".parse().unwrap());
/// let config = ParserConfig::default();
/// let ids = SequentialIds::new("id");
///
/// let doc = ChapterSplitter::new(&pairer, &config, &ids)
///     .split("# My Book Title\n\n## Chapter 1\nContent.");
///
/// assert_eq!(doc.title["en"], "My Book Title");
/// assert_eq!(doc.chapters.len(), 1);
/// assert_eq!(doc.chapters[0].title["en"], "Chapter 1");
/// ```
pub struct ChapterSplitter<'a> {
    pairer: &'a BilingualPairer,
    config: &'a ParserConfig,
    ids: &'a dyn IdGenerator,
}

impl<'a> ChapterSplitter<'a> {
    /// Create a splitter.
    #[must_use]
    pub fn new(
        pairer: &'a BilingualPairer,
        config: &'a ParserConfig,
        ids: &'a dyn IdGenerator,
    ) -> Self {
        Self {
            pairer,
            config,
            ids,
        }
    }

    /// Split a full document.
    #[must_use]
    pub fn split(&self, markdown: &str) -> Document {
        let origin = self.pairer.origin();
        let normalized = markdown.replace("\r\n", "\n");
        let lines: Vec<&str> = normalized.lines().collect();

        let Some(title_line) = find_title(&lines) else {
            debug!("document has no content");
            return Document::empty(origin);
        };
        let title = self.pairer.pair_title(&clean(title_line.text));

        let spans = chapter_spans(&lines[title_line.body_start..]);
        let has_chapter_headings = spans.iter().any(|span| span.heading.is_some());
        let builder = SegmentBuilder::new(self.pairer, self.config, self.ids);

        let mut chapters = Vec::with_capacity(spans.len());
        for span in spans {
            let segments = builder.build_lines(&span.lines);
            let chapter_title = match span.heading {
                Some(text) => self.pairer.pair_title(&clean(text)),
                None if has_chapter_headings => {
                    TextMap::from([(origin.primary().to_string(), String::new())])
                }
                None => TextMap::from([(
                    origin.primary().to_string(),
                    self.config.default_chapter_title().to_string(),
                )]),
            };

            let untitled = span.heading.is_none()
                || chapter_title.values().all(|t| t.trim().is_empty());
            if segments.is_empty() && untitled {
                trace!(heading = ?span.heading, "pruning empty chapter");
                continue;
            }

            chapters.push(Chapter {
                id: self.ids.next_id(),
                order: chapters.len(),
                title: chapter_title,
                stats: ChapterStats::compute(&segments, origin.primary(), self.config),
                segments,
            });
        }

        debug!(
            title_source = ?title_line.source,
            chapters = chapters.len(),
            synthetic = !has_chapter_headings,
            "split document"
        );
        Document { title, chapters }
    }
}

/// Resolve the title line: first H1, else first H3, else the first line
/// with text, stripped of list, quote and image markup. Fenced code and
/// thematic breaks are never titles.
fn find_title<'a>(lines: &[&'a str]) -> Option<TitleLine<'a>> {
    for (level, source) in [(1, TitleSource::H1), (3, TitleSource::H3)] {
        let found = lines.iter().enumerate().find_map(|(i, line)| {
            heading(line)
                .filter(|(l, _)| *l == level)
                .map(|(_, text)| TitleLine {
                    text,
                    body_start: i + 1,
                    source,
                })
        });
        if found.is_some() {
            return found;
        }
    }

    let mut in_fence = false;
    for (index, line) in lines.iter().enumerate() {
        let (text, body_start) = match classify_line(line) {
            LineKind::CodeFence => {
                in_fence = !in_fence;
                continue;
            }
            _ if in_fence => continue,
            // An H2 both names the document and opens the first chapter.
            LineKind::Heading { level: 2, text } => (text, index),
            LineKind::Heading { text, .. }
            | LineKind::Text(text)
            | LineKind::ListItem(text)
            | LineKind::Blockquote(text) => (text, index + 1),
            LineKind::Image { alt, .. } if !alt.is_empty() => (alt, index + 1),
            LineKind::Image { .. } | LineKind::Blank | LineKind::ThematicBreak => continue,
        };
        return Some(TitleLine {
            text,
            body_start,
            source: TitleSource::FirstLine,
        });
    }
    None
}

fn chapter_spans<'a>(lines: &[&'a str]) -> Vec<Span<'a>> {
    let mut spans = vec![Span {
        heading: None,
        lines: Vec::new(),
    }];
    for line in lines {
        if is_heading_level(line, 2) {
            let text = heading(line).map_or("", |(_, text)| text);
            spans.push(Span {
                heading: Some(text),
                lines: Vec::new(),
            });
        } else if let Some(span) = spans.last_mut() {
            span.lines.push(line);
        }
    }
    spans
}
