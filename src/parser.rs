//! The top-level entry point.
//!
//! [`Parser`] owns configuration and the identifier source, and wires the
//! pipeline together per call:
//!
//! ```text
//! markdown ──► ChapterSplitter ──► SegmentBuilder ──► BilingualPairer
//!                   │                    │                  │
//!              title, H2s          blocks, flags      sentences, phrases
//! ```
//!
//! Segmentation is best-effort. A panic anywhere in the pipeline is caught,
//! logged, and turned into an empty result rather than taking the caller down.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error};

use crate::bilingual::BilingualPairer;
use crate::chapter::{ChapterSplitter, Document};
use crate::config::ParserConfig;
use crate::ids::IdGenerator;
use crate::origin::Origin;
use crate::segment::{Segment, SegmentBuilder};

/// Configured Markdown segmentation engine.
///
/// ```rust
/// use std::sync::Arc;
/// use segmark::{Parser, SequentialIds};
///
/// let parser = Parser::new(Arc::new(SequentialIds::new("id")));
/// let origin = "en-vi".parse().unwrap();
///
/// let doc = parser.parse_document("# Hello / Xin chào\n\n## One\nHello there. {Chào bạn.}", &origin);
/// assert_eq!(doc.title["vi"], "Xin chào");
/// assert_eq!(doc.chapters[0].segments[0].text("vi").as_deref(), Some("Chào bạn."));
/// ```
#[derive(Clone)]
pub struct Parser {
    config: ParserConfig,
    ids: Arc<dyn IdGenerator>,
}

impl Parser {
    /// Create a parser with default configuration.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_config(ParserConfig::default(), ids)
    }

    /// Create a parser with explicit configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self { config, ids }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a full Markdown document into a title and chapters.
    #[must_use]
    pub fn parse_document(&self, markdown: &str, origin: &Origin) -> Document {
        let pairer = BilingualPairer::new(origin.clone());
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            ChapterSplitter::new(&pairer, &self.config, self.ids.as_ref()).split(markdown)
        }));
        match result {
            Ok(doc) => {
                debug!(
                    %origin,
                    chapters = doc.chapters.len(),
                    segments = doc.segment_count(),
                    "parsed document"
                );
                doc
            }
            Err(payload) => {
                error!(%origin, reason = panic_message(&*payload), "document parse panicked");
                Document::empty(origin)
            }
        }
    }

    /// Parse a block of text into segments, ignoring chapter structure.
    #[must_use]
    pub fn parse_segments(&self, text: &str, origin: &Origin) -> Vec<Segment> {
        let pairer = BilingualPairer::new(origin.clone());
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let normalized = text.replace("\r\n", "\n");
            SegmentBuilder::new(&pairer, &self.config, self.ids.as_ref()).build(&normalized)
        }));
        result.unwrap_or_else(|payload| {
            error!(%origin, reason = panic_message(&*payload), "segment parse panicked");
            Vec::new()
        })
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    struct PanickingIds;

    impl IdGenerator for PanickingIds {
        fn next_id(&self) -> String {
            panic!("id source exhausted")
        }
    }

    fn parser() -> Parser {
        Parser::new(Arc::new(SequentialIds::new("id")))
    }

    #[test]
    fn test_parse_document() {
        let origin: Origin = "en".parse().unwrap();
        let doc = parser().parse_document("# Title\n## Chapter 1\nIt was dark.", &origin);
        assert_eq!(doc.chapters.len(), 1);
        assert_eq!(doc.segment_count(), 1);
    }

    #[test]
    fn test_parse_segments() {
        let origin: Origin = "en".parse().unwrap();
        let segments = parser().parse_segments("## Not a chapter\r\nFirst one. Second one.", &origin);
        assert_eq!(segments.len(), 2);
        assert!(segments[0].metadata.is_new_para);
    }

    #[test]
    fn test_panic_becomes_empty_document() {
        let origin: Origin = "en-vi".parse().unwrap();
        let parser = Parser::new(Arc::new(PanickingIds));
        let doc = parser.parse_document("# Title\n## C\nText here.", &origin);
        assert_eq!(doc, Document::empty(&origin));
        assert!(parser.parse_segments("Text here.", &origin).is_empty());
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }

    #[test]
    fn test_config_is_used() {
        let config = ParserConfig::default().with_default_chapter_title("Part One");
        let parser = Parser::with_config(config, Arc::new(SequentialIds::new("id")));
        let doc = parser.parse_document("# T\nBody text.", &"en".parse().unwrap());
        assert_eq!(doc.chapters[0].title["en"], "Part One");
        assert_eq!(parser.config().default_chapter_title(), "Part One");
    }
}
