//! Footnote stripping and whitespace normalization.
//!
//! Model output sprinkles citation markers through the text:
//!
//! ```text
//! "English part[23]. {Phần Tiếng Việt.[45]}"
//!              ^^^^                    ^^^^
//! ```
//!
//! They carry no meaning for a reader, so they are removed before any
//! boundary detection runs. Removal repeats until no marker is left, which
//! keeps [`clean`] idempotent even for inputs like `[1[2]]`.

/// Remove `[digits]` footnote markers and normalize whitespace.
///
/// Runs of horizontal whitespace collapse to a single space, lines are
/// trimmed, and the result is trimmed. Newlines are kept: they are hard
/// boundaries for the sentence scanner.
///
/// ```rust
/// use segmark::clean;
///
/// assert_eq!(clean("  Hello[1]   world.[22] "), "Hello world.");
/// assert_eq!(clean(&clean("a [1[2]] b")), clean("a [1[2]] b"));
/// ```
#[must_use]
pub fn clean(text: &str) -> String {
    normalize_whitespace(&strip_footnotes(text))
}

/// Remove every `[digits]` marker, repeating until none remain.
#[must_use]
pub fn strip_footnotes(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let (next, removed) = strip_once(&current);
        if !removed {
            return next;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> (String, bool) {
    let mut out = String::with_capacity(text.len());
    let mut removed = false;
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && after.as_bytes().get(digits) == Some(&b']') {
            removed = true;
            rest = &after[digits + 1..];
        } else {
            out.push('[');
            rest = after;
        }
    }
    out.push_str(rest);
    (out, removed)
}

/// Collapse horizontal whitespace runs, trim every line, trim the whole.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markers() {
        assert_eq!(clean("English part[23]."), "English part.");
        assert_eq!(clean("Phần Tiếng Việt.[45]"), "Phần Tiếng Việt.");
    }

    #[test]
    fn test_keeps_non_numeric_brackets() {
        assert_eq!(clean("see [note] and [] and [1a]"), "see [note] and [] and [1a]");
    }

    #[test]
    fn test_nested_markers_idempotent() {
        let once = clean("a [1[2]] b");
        assert_eq!(once, "a b");
        assert_eq!(clean(&once), once);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(clean("  a \t b  \n   c  "), "a b\nc");
        assert_eq!(clean("a\r\nb"), "a\nb");
    }

    #[test]
    fn test_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n\n  "), "");
        assert_eq!(clean("[1][2]"), "");
    }

    #[test]
    fn test_unicode_before_marker() {
        assert_eq!(clean("日本語[3]です"), "日本語です");
    }
}
