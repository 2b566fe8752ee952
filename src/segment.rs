//! Segments: the atomic unit of structured content.
//!
//! A segment is one sentence (sentence mode) or one aligned phrase group
//! (phrase mode), plus where it sits:
//!
//! ```text
//! "Once upon a time. {Ngày xửa ngày xưa.} There was a fox.\n\n\"Hi!\" it said."
//!
//! order  type    isNewPara  content
//! 0      text    true       {en: "Once upon a time.", vi: "Ngày xửa ngày xưa."}
//! 1      text    false      {en: "There was a fox."}
//! 2      dialog  true       {en: "\"Hi!\" it said."}
//! ```
//!
//! `order` is contiguous from zero within the block handed to the builder.
//! `isNewPara` marks the first segment of the block and the first segment
//! after every blank line.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bilingual::{open_braces, BilingualPairer};
use crate::clean::clean;
use crate::config::ParserConfig;
use crate::content::{Content, TextMap};
use crate::dialog::is_dialog;
use crate::ids::IdGenerator;
use crate::markdown::{classify_line, LineKind};
use crate::origin::BilingualFormat;

/// Structural kind of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    /// Ordinary prose.
    Text,
    /// Prose containing a balanced quotation.
    Dialog,
    /// A sub-heading kept as content.
    Heading,
    /// Text from a `>` blockquote.
    Blockquote,
    /// Text from a bulleted or numbered list item.
    ListItem,
    /// An image line; content holds the alt text.
    Image,
}

/// Per-segment flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMetadata {
    /// First segment of a paragraph.
    pub is_new_para: bool,
    /// Alignment shape of `content`, fixed per document.
    pub bilingual_format: BilingualFormat,
    /// Source of an image segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

/// One ordered unit of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Identifier from the [`IdGenerator`].
    pub id: String,
    /// Zero-based position in the containing chapter or block.
    pub order: usize,
    /// Structural kind.
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    /// Language-keyed text.
    pub content: Content,
    /// Paragraph and format flags.
    pub metadata: SegmentMetadata,
}

impl Segment {
    /// Text of this segment in `lang`, if present.
    #[must_use]
    pub fn text(&self, lang: &str) -> Option<String> {
        self.content.text(lang)
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Segment {{ order: {}, type: {:?}, new_para: {} }}",
            self.order, self.segment_type, self.metadata.is_new_para
        )
    }
}

/// Turns a block of Markdown lines into ordered segments.
///
/// ## Example
///
/// ```rust
/// use segmark::{BilingualPairer, ParserConfig, SegmentBuilder, SequentialIds};
///
/// let pairer = BilingualPairer::new("en".parse().unwrap());
/// let config = ParserConfig::default();
/// let ids = SequentialIds::new("s");
///
/// let builder = SegmentBuilder::new(&pairer, &config, &ids);
/// let segments = builder.build("First. Second.\n\nThird.");
///
/// assert_eq!(segments.len(), 3);
/// assert!(segments[0].metadata.is_new_para);
/// assert!(!segments[1].metadata.is_new_para);
/// assert!(segments[2].metadata.is_new_para);
/// ```
pub struct SegmentBuilder<'a> {
    pairer: &'a BilingualPairer,
    config: &'a ParserConfig,
    ids: &'a dyn IdGenerator,
}

/// Mutable state threaded through one build.
struct BuildState {
    segments: Vec<Segment>,
    new_para: bool,
}

impl BuildState {
    fn take_new_para(&mut self) -> bool {
        std::mem::replace(&mut self.new_para, false)
    }
}

impl<'a> SegmentBuilder<'a> {
    /// Create a builder.
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

    /// Build segments from a block of text.
    #[must_use]
    pub fn build(&self, block: &str) -> Vec<Segment> {
        let lines: Vec<&str> = block.lines().collect();
        self.build_lines(&lines)
    }

    /// Build segments from pre-split lines.
    #[must_use]
    pub fn build_lines(&self, lines: &[&str]) -> Vec<Segment> {
        let single_line = lines.iter().filter(|l| !l.trim().is_empty()).count() == 1;
        let mut state = BuildState {
            segments: Vec::new(),
            new_para: true,
        };
        let mut in_fence = false;

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            i += 1;
            let kind = classify_line(line);
            if kind == LineKind::CodeFence {
                in_fence = !in_fence;
                state.new_para = true;
                continue;
            }
            if in_fence {
                continue;
            }

            match kind {
                LineKind::Blank | LineKind::ThematicBreak | LineKind::CodeFence => {
                    state.new_para = true;
                }
                LineKind::Heading { level, text } => self.heading(&mut state, level, text),
                LineKind::Image { alt, src } => self.image(&mut state, alt, src),
                LineKind::Blockquote(body) => {
                    let (body, consumed) = join_open_group(body, &lines[i..]);
                    i += consumed;
                    self.prose(&mut state, &body, SegmentType::Blockquote, single_line);
                }
                LineKind::ListItem(body) => {
                    let (body, consumed) = join_open_group(body, &lines[i..]);
                    i += consumed;
                    self.prose(&mut state, &body, SegmentType::ListItem, single_line);
                }
                LineKind::Text(body) => {
                    let (body, consumed) = join_open_group(body, &lines[i..]);
                    i += consumed;
                    self.prose(&mut state, &body, SegmentType::Text, single_line);
                }
            }
        }

        debug!(lines = lines.len(), segments = state.segments.len(), "built segments");
        state.segments
    }

    fn prose(&self, state: &mut BuildState, body: &str, kind: SegmentType, single_line: bool) {
        let cleaned = clean(body);
        if cleaned.is_empty() {
            return;
        }

        let units = if single_line && self.config.slash_single_line() {
            self.pairer
                .pair_slash_line(&cleaned)
                .map(|content| vec![content])
                .unwrap_or_else(|| self.pairer.pair_line(&cleaned))
        } else {
            self.pairer.pair_line(&cleaned)
        };

        let primary = self.pairer.origin().primary();
        for content in units {
            if content.is_blank() {
                continue;
            }
            let segment_type = match kind {
                SegmentType::Text if is_dialog(&content.text(primary).unwrap_or_default()) => {
                    SegmentType::Dialog
                }
                other => other,
            };
            self.push(state, segment_type, content, None);
        }
    }

    fn heading(&self, state: &mut BuildState, level: usize, text: &str) {
        state.new_para = true;
        let text = clean(text);
        if !self.config.keep_subheadings() || level < 3 || text.is_empty() {
            trace!(level, text = %text, "skipping heading line");
            return;
        }
        let content = self.shaped(self.pairer.pair_title(&text));
        self.push(state, SegmentType::Heading, content, None);
        state.new_para = true;
    }

    fn image(&self, state: &mut BuildState, alt: &str, src: &str) {
        let alt = clean(alt);
        let content = self.shaped(self.pairer.pair_title(&alt));
        self.push(state, SegmentType::Image, content, Some(src.to_string()));
    }

    /// Wrap a title-like map in the document's content shape.
    fn shaped(&self, map: TextMap) -> Content {
        match self.pairer.origin().format() {
            BilingualFormat::Sentence => Content::Sentence(map),
            BilingualFormat::Phrase => Content::Phrase(vec![map]),
        }
    }

    fn push(
        &self,
        state: &mut BuildState,
        segment_type: SegmentType,
        content: Content,
        image_src: Option<String>,
    ) {
        let segment = Segment {
            id: self.ids.next_id(),
            order: state.segments.len(),
            segment_type,
            content,
            metadata: SegmentMetadata {
                is_new_para: state.take_new_para(),
                bilingual_format: self.pairer.origin().format(),
                image_src,
            },
        };
        trace!(%segment, "segment");
        state.segments.push(segment);
    }
}

/// Join a line that leaves a `{` open with the following prose lines until
/// the group closes. Returns the joined text and the number of extra
/// lines consumed; an unclosed group within the paragraph consumes nothing.
fn join_open_group<'l>(body: &'l str, rest: &[&str]) -> (Cow<'l, str>, usize) {
    if open_braces(body) == 0 {
        return (Cow::Borrowed(body), 0);
    }
    let mut joined = body.to_string();
    for (n, next) in rest.iter().enumerate() {
        let next = match classify_line(next) {
            LineKind::Text(text) | LineKind::Blockquote(text) => text,
            _ => break,
        };
        joined.push(' ');
        joined.push_str(next);
        if open_braces(&joined) == 0 {
            trace!(lines = n + 2, "joined wrapped translation");
            return (Cow::Owned(joined), n + 1);
        }
    }
    (Cow::Borrowed(body), 0)
}
