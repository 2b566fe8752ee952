//! Single-line Markdown structure recognition.
//!
//! The engine never builds a Markdown tree. It only needs to know, line by
//! line, whether a line is a heading, a paragraph break, or prose with a
//! structural marker in front of it:
//!
//! ```text
//! "## Chapter 2"          Heading { level: 2, text: "Chapter 2" }
//! "> Quoted words."       Blockquote("Quoted words.")
//! "- Item"  / "3. Item"   ListItem("Item")
//! "![Cat](cat.png)"       Image { alt: "Cat", src: "cat.png" }
//! "---" / "* * *"         ThematicBreak
//! "```rust"               CodeFence
//! ```

/// What a single line of Markdown is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// ATX heading, level 1 to 6.
    Heading {
        /// Number of `#` markers.
        level: usize,
        /// Heading text without markers.
        text: &'a str,
    },
    /// `---`, `***`, `___` and spaced variants.
    ThematicBreak,
    /// Opening or closing code fence.
    CodeFence,
    /// A line holding only an image.
    Image {
        /// Alternative text.
        alt: &'a str,
        /// Image source.
        src: &'a str,
    },
    /// Blockquote body with `>` markers removed.
    Blockquote(&'a str),
    /// List item body with its bullet or number removed.
    ListItem(&'a str),
    /// Plain prose.
    Text(&'a str),
}

/// Classify one line.
///
/// ```rust
/// use segmark::markdown::{classify_line, LineKind};
///
/// assert_eq!(classify_line("# Title"), LineKind::Heading { level: 1, text: "Title" });
/// assert_eq!(classify_line("#hashtag"), LineKind::Text("#hashtag"));
/// assert_eq!(classify_line("  "), LineKind::Blank);
/// ```
#[must_use]
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if let Some((level, text)) = heading(line) {
        return LineKind::Heading { level, text };
    }
    if is_thematic_break(trimmed) {
        return LineKind::ThematicBreak;
    }
    if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
        return LineKind::CodeFence;
    }
    if let Some((alt, src)) = image(trimmed) {
        return LineKind::Image { alt, src };
    }
    if trimmed.starts_with('>') {
        let body = trimmed.trim_start_matches(|c: char| c == '>' || c.is_whitespace());
        return if body.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Blockquote(body)
        };
    }
    if let Some(body) = list_item(trimmed) {
        return LineKind::ListItem(body);
    }
    LineKind::Text(trimmed)
}

/// Level and text of an ATX heading line.
///
/// Up to three spaces of indentation are allowed; a closing run of `#` is
/// removed.
#[must_use]
pub fn heading(line: &str) -> Option<(usize, &str)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let level = rest.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let after = &rest[level..];
    if !(after.is_empty() || after.starts_with(char::is_whitespace)) {
        return None;
    }
    let text = after.trim();
    let text = match text.trim_end_matches('#') {
        stripped if stripped.is_empty() => stripped,
        stripped if stripped.ends_with(char::is_whitespace) => stripped.trim_end(),
        _ => text,
    };
    Some((level, text))
}

/// Whether a line is an ATX heading of exactly `level`.
#[must_use]
pub fn is_heading_level(line: &str, level: usize) -> bool {
    heading(line).is_some_and(|(l, _)| l == level)
}

fn is_thematic_break(trimmed: &str) -> bool {
    let mut marks = trimmed.chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_')
        && trimmed.chars().filter(|c| !c.is_whitespace()).count() >= 3
        && marks.all(|c| c == first)
}

fn image(trimmed: &str) -> Option<(&str, &str)> {
    let inner = trimmed.strip_prefix("![")?.strip_suffix(')')?;
    let (alt, src) = inner.split_once("](")?;
    Some((alt.trim(), src.trim()))
}

fn list_item(trimmed: &str) -> Option<&str> {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(body) = trimmed.strip_prefix(bullet) {
            return Some(body.trim_start());
        }
    }
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let rest = &trimmed[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(str::trim_start)
}
