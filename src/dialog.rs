//! Dialogue detection by balanced quotation marks.
//!
//! A unit counts as dialogue when it contains at least one complete quote
//! pair in any supported style:
//!
//! | Style | Open | Close |
//! |-------|------|-------|
//! | Straight | `"` | `"` |
//! | Curly double | `“` | `”` |
//! | Curly single | `‘` | `’` |
//! | Guillemets | `«` / `‹` | `»` / `›` |
//! | CJK corner brackets | `「` / `『` | `」` / `』` |
//!
//! Straight single quotes are not considered: they double as apostrophes.

const PAIRED_QUOTES: &[(char, char)] = &[
    ('\u{201C}', '\u{201D}'),
    ('\u{2018}', '\u{2019}'),
    ('\u{00AB}', '\u{00BB}'),
    ('\u{2039}', '\u{203A}'),
    ('\u{300C}', '\u{300D}'),
    ('\u{300E}', '\u{300F}'),
];

/// Whether `text` contains a balanced quotation pair.
///
/// ```rust
/// use segmark::is_dialog;
///
/// assert!(is_dialog("\u{201C}Run!\u{201D} she said."));
/// assert!(is_dialog("He said \"no\"."));
/// assert!(!is_dialog("It's a dog's life."));
/// ```
#[must_use]
pub fn is_dialog(text: &str) -> bool {
    if text.matches('"').count() >= 2 {
        return true;
    }
    PAIRED_QUOTES
        .iter()
        .any(|&(open, close)| has_pair(text, open, close))
}

fn has_pair(text: &str, open: char, close: char) -> bool {
    text.find(open)
        .is_some_and(|at| text[at + open.len_utf8()..].contains(close))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_quotes() {
        assert!(is_dialog("\"Hello,\" he said."));
        assert!(!is_dialog("A lone \" mark."));
    }

    #[test]
    fn test_curly_quotes() {
        assert!(is_dialog("\u{201C}Hello.\u{201D}"));
        assert!(is_dialog("\u{2018}Hi\u{2019} she said"));
        assert!(!is_dialog("\u{201D}backwards\u{201C}"));
    }

    #[test]
    fn test_guillemets() {
        assert!(is_dialog("\u{00AB}Bonjour\u{00BB}, dit-il."));
    }

    #[test]
    fn test_cjk_brackets() {
        assert!(is_dialog("\u{300C}こんにちは\u{300D}と言った。"));
        assert!(is_dialog("\u{300E}引用\u{300F}"));
    }

    #[test]
    fn test_apostrophes_are_not_dialog() {
        assert!(!is_dialog("Don't stop. It's fine."));
        assert!(!is_dialog("The dogs\u{2019} bowls."));
    }

    #[test]
    fn test_empty() {
        assert!(!is_dialog(""));
    }
}
