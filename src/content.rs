//! Language-keyed content.
//!
//! A segment carries its text once per language. In sentence mode that is a
//! single map from language code to text; in phrase mode it is an ordered
//! list of such maps, one per aligned phrase:
//!
//! ```text
//! Sentence: { "en": "Hello, world.", "vi": "Xin chào, thế giới." }
//!
//! Phrase:   [ { "en": "Hello,", "vi": "Xin chào," },
//!             { "en": "world.", "vi": "thế giới." } ]
//! ```
//!
//! The two shapes are kept apart by [`Content`] so callers cannot read one as
//! the other. Maps are `BTreeMap`s so serialized output is stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Text keyed by language code.
pub type TextMap = BTreeMap<String, String>;

/// One aligned phrase, keyed by language code.
pub type PhraseMap = TextMap;

/// Build a [`TextMap`] from `(language, text)` pairs.
///
/// ```rust
/// let map = segmark::text_map([("en", "Hi."), ("vi", "Chào.")]);
/// assert_eq!(map["vi"], "Chào.");
/// ```
pub fn text_map<'a, I>(entries: I) -> TextMap
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .map(|(lang, text)| (lang.to_string(), text.to_string()))
        .collect()
}

/// Segment content in one of the two alignment shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Whole-sentence text per language.
    Sentence(TextMap),
    /// Positionally aligned phrases.
    Phrase(Vec<PhraseMap>),
}

impl Content {
    /// Whether this is phrase-aligned content.
    #[must_use]
    pub const fn is_phrase(&self) -> bool {
        matches!(self, Self::Phrase(_))
    }

    /// The text for `lang`, if any entry carries that language.
    ///
    /// Phrase content is joined with single spaces, skipping empty phrases.
    #[must_use]
    pub fn text(&self, lang: &str) -> Option<String> {
        match self {
            Self::Sentence(map) => map.get(lang).cloned(),
            Self::Phrase(phrases) => {
                let mut parts = phrases.iter().filter_map(|p| p.get(lang)).peekable();
                parts.peek()?;
                Some(
                    parts
                        .filter(|p| !p.is_empty())
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(" "),
                )
            }
        }
    }

    /// Whether any entry carries `lang`.
    #[must_use]
    pub fn has_language(&self, lang: &str) -> bool {
        match self {
            Self::Sentence(map) => map.contains_key(lang),
            Self::Phrase(phrases) => phrases.iter().any(|p| p.contains_key(lang)),
        }
    }

    /// Whether every value in the content is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Sentence(map) => map.values().all(|t| t.trim().is_empty()),
            Self::Phrase(phrases) => phrases
                .iter()
                .all(|p| p.values().all(|t| t.trim().is_empty())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_text() {
        let content = Content::Sentence(text_map([("en", "Hello."), ("vi", "Chào.")]));
        assert_eq!(content.text("en").as_deref(), Some("Hello."));
        assert_eq!(content.text("fr"), None);
        assert!(!content.is_phrase());
    }

    #[test]
    fn test_phrase_text_joins() {
        let content = Content::Phrase(vec![
            text_map([("en", "Hello,"), ("vi", "Xin chào,")]),
            text_map([("en", "world."), ("vi", "")]),
        ]);
        assert_eq!(content.text("en").as_deref(), Some("Hello, world."));
        assert_eq!(content.text("vi").as_deref(), Some("Xin chào,"));
        assert!(content.has_language("vi"));
        assert!(!content.has_language("fr"));
    }

    #[test]
    fn test_serializes_untagged() {
        let sentence = Content::Sentence(text_map([("en", "Hi.")]));
        assert_eq!(serde_json::to_string(&sentence).unwrap(), r#"{"en":"Hi."}"#);

        let phrase = Content::Phrase(vec![text_map([("en", "Hi,")])]);
        assert_eq!(serde_json::to_string(&phrase).unwrap(), r#"[{"en":"Hi,"}]"#);

        let back: Content = serde_json::from_str(r#"[{"en":"Hi,"}]"#).unwrap();
        assert_eq!(back, phrase);
    }

    #[test]
    fn test_blank() {
        assert!(Content::Sentence(text_map([("en", " ")])).is_blank());
        assert!(!Content::Phrase(vec![text_map([("en", "x")])]).is_blank());
    }
}
