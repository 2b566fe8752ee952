//! End-to-end tests for document and segment parsing.
//!
//! Each test drives the public API the way a reader app would: Markdown in,
//! chapters and segments out.

use std::sync::Arc;

use segmark::{
    clean, split_sentences, text_map, BilingualFormat, Content, Document, Origin, Parser,
    ParserConfig, Segment, SegmentType, SequentialIds,
};

fn parser() -> Parser {
    Parser::new(Arc::new(SequentialIds::new("id")))
}

fn origin(descriptor: &str) -> Origin {
    descriptor.parse().unwrap()
}

fn document(markdown: &str, descriptor: &str) -> Document {
    parser().parse_document(markdown, &origin(descriptor))
}

fn segments(text: &str, descriptor: &str) -> Vec<Segment> {
    parser().parse_segments(text, &origin(descriptor))
}

// =============================================================================
// Cleaning and sentence boundaries
// =============================================================================

#[test]
fn clean_is_idempotent_on_samples() {
    for s in [
        "",
        "  spaced   out  ",
        "Note[1] and[22] more[333].",
        "a[[1]]b",
        "line one\n\n\n  line two  ",
        "Tabs\tand\u{a0}nbsp",
    ] {
        let once = clean(s);
        assert_eq!(clean(&once), once, "input {s:?}");
    }
}

#[test]
fn abbreviations_do_not_split() {
    assert_eq!(split_sentences("Dr. Smith went to St. Louis.").len(), 1);
}

#[test]
fn decimals_do_not_split() {
    assert_eq!(split_sentences("The price is $99.99 today.").len(), 1);
}

#[test]
fn empty_input_yields_nothing() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences("   \n\n  ").is_empty());
    assert!(segments("", "en").is_empty());
    assert!(segments("   \n\n  ", "en-vi").is_empty());
    assert!(document("", "en").chapters.is_empty());
}

// =============================================================================
// Bilingual pairing
// =============================================================================

#[test]
fn bilingual_sentence_pair() {
    let segs = segments("Hello world. {Xin chào thế giới.}", "en-vi");
    assert_eq!(segs.len(), 1);
    assert_eq!(
        segs[0].content,
        Content::Sentence(text_map([("en", "Hello world."), ("vi", "Xin chào thế giới.")]))
    );
}

#[test]
fn missing_translation_degrades_to_empty() {
    let segs = segments("English only. {}", "en-vi");
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].text("en").as_deref(), Some("English only."));
    assert_eq!(segs[0].text("vi").as_deref(), Some(""));
}

#[test]
fn footnotes_are_stripped_on_both_sides() {
    let segs = segments("English part[23]. {Phần Tiếng Việt.[45]}", "en-vi");
    assert_eq!(segs[0].text("en").as_deref(), Some("English part."));
    assert_eq!(segs[0].text("vi").as_deref(), Some("Phần Tiếng Việt."));
}

#[test]
fn interleaved_pairs_become_separate_segments() {
    let segs = segments(
        "It was dark. {Trời tối.} The rain fell. {Mưa rơi.}",
        "en-vi",
    );
    let vi: Vec<_> = segs.iter().map(|s| s.text("vi").unwrap()).collect();
    assert_eq!(vi, ["Trời tối.", "Mưa rơi."]);
}

#[test]
fn phrase_mode_aligns_by_position() {
    let segs = segments(
        "When it rained, we stayed in. {Khi trời mưa, chúng tôi ở nhà.}",
        "en-vi-ph",
    );
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].metadata.bilingual_format, BilingualFormat::Phrase);
    let Content::Phrase(phrases) = &segs[0].content else {
        panic!("expected phrase content");
    };
    assert_eq!(
        phrases,
        &[
            text_map([("en", "When it rained,"), ("vi", "Khi trời mưa,")]),
            text_map([("en", "we stayed in."), ("vi", "chúng tôi ở nhà.")]),
        ]
    );
}

#[test]
fn phrase_mode_pads_missing_side() {
    let segs = segments("First, second, third. {Một, hai.}", "en-vi-ph");
    let Content::Phrase(phrases) = &segs[0].content else {
        panic!("expected phrase content");
    };
    assert_eq!(phrases.len(), 3);
    assert_eq!(phrases[2], text_map([("en", "third."), ("vi", "")]));
}

// =============================================================================
// Segments
// =============================================================================

#[test]
fn paragraph_boundaries_flag_first_segments() {
    let segs = segments("It rained. We stayed in.\n\nThe sun came out. We went out.", "en");
    let flags: Vec<bool> = segs.iter().map(|s| s.metadata.is_new_para).collect();
    assert_eq!(flags, [true, false, true, false]);
}

#[test]
fn dialog_is_detected() {
    let segs = segments("\u{201C}Come in,\u{201D} she said.", "en");
    assert_eq!(segs[0].segment_type, SegmentType::Dialog);
}

#[test]
fn segment_json_shape() {
    let segs = segments("Hello world. {Xin chào.}", "en-vi");
    let json = serde_json::to_value(&segs[0]).unwrap();
    assert_eq!(json["id"], "id-0");
    assert_eq!(json["order"], 0);
    assert_eq!(json["type"], "text");
    assert_eq!(json["content"]["vi"], "Xin chào.");
    assert_eq!(json["metadata"]["isNewPara"], true);
    assert_eq!(json["metadata"]["bilingualFormat"], "sentence");
}

// =============================================================================
// Chapters
// =============================================================================

#[test]
fn chapter_title_extraction() {
    let doc = document("# My Book Title\n\n## Chapter 1\nContent.", "en");
    assert_eq!(doc.title["en"], "My Book Title");
    assert_eq!(doc.chapters.len(), 1);
    assert_eq!(doc.chapters[0].title["en"], "Chapter 1");
}

#[test]
fn missing_chapter_headings_make_one_chapter() {
    let doc = document(
        "# A Title\n\nFirst one. Second one.\n\nThird one.\n\nFourth one.",
        "en",
    );
    assert_eq!(doc.chapters.len(), 1);
    assert_eq!(doc.chapters[0].title["en"], "Chapter 1");
    assert_eq!(doc.chapters[0].segments.len(), 4);
}

#[test]
fn order_is_monotonic_in_every_chapter() {
    let doc = document(
        "# T\n## One\nA one. B two.\n\nC three.\n## Two\nD four.\n\n- E five.\n> F six.",
        "en",
    );
    for (i, chapter) in doc.chapters.iter().enumerate() {
        assert_eq!(chapter.order, i);
        for pair in chapter.segments.windows(2) {
            assert!(pair[0].order < pair[1].order);
        }
    }
}

#[test]
fn bilingual_document() {
    let markdown = "\
# The Lost Key / Chìa Khóa Bị Mất

## Chapter 1 / Chương 1
It was dark. {Trời tối.} Mr. Lee waited. {Ông Lee đợi.}

\"Who is there?\" he asked. {\"Ai đó?\" ông hỏi.}

## Chapter 2 / Chương 2
The door opened. {Cánh cửa mở ra.}
";
    let doc = document(markdown, "en-vi");
    assert_eq!(
        doc.title,
        text_map([("en", "The Lost Key"), ("vi", "Chìa Khóa Bị Mất")])
    );
    assert_eq!(doc.chapters.len(), 2);

    let first = &doc.chapters[0];
    assert_eq!(first.title["vi"], "Chương 1");
    assert_eq!(first.segments.len(), 3);
    assert_eq!(first.segments[1].text("en").as_deref(), Some("Mr. Lee waited."));
    assert_eq!(first.segments[2].segment_type, SegmentType::Dialog);
    assert!(first.segments[2].metadata.is_new_para);
    assert_eq!(first.stats.total_segments, 3);
    assert_eq!(first.stats.estimated_reading_time, 1);

    let ids: std::collections::HashSet<_> = doc
        .chapters
        .iter()
        .flat_map(|c| c.segments.iter().map(|s| s.id.clone()).chain([c.id.clone()]))
        .collect();
    assert_eq!(ids.len(), doc.segment_count() + doc.chapters.len());
}

#[test]
fn configured_reading_speed() {
    let config = ParserConfig::default().with_words_per_minute(2).unwrap();
    let parser = Parser::with_config(config, Arc::new(SequentialIds::new("id")));
    let doc = parser.parse_document("# T\n## C\nfive words are right here.", &origin("en"));
    assert_eq!(doc.chapters[0].stats.total_words, 5);
    assert_eq!(doc.chapters[0].stats.estimated_reading_time, 3);
}

#[test]
fn free_functions_use_uuids() {
    let doc = segmark::parse_document("# T\n## C\nSome text.", "en").unwrap();
    let id = &doc.chapters[0].segments[0].id;
    assert_eq!(id.len(), 36);
    assert!(segmark::parse_segments("Text.", "").is_err());
}

#[test]
fn document_json_round_trips() {
    let doc = document("# T / Tựa\n## C / Chương\nHello. {Chào.}", "en-vi-ph");
    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}
