//! Sentence boundary detection.
//!
//! Splits a block of text into sentences with a punctuation-driven scanner.
//!
//! ## The Hard Part: Periods Lie
//!
//! ```text
//! "Dr. Smith paid $99.99 at St. Louis... Then he left."
//!     ^             ^         ^     ^^^
//!     title        decimal  title  ellipsis + capital: boundary
//! ```
//!
//! Only the ellipsis and the final period end sentences. The scanner walks
//! extended grapheme clusters (UAX #29) through four named states:
//!
//! ```text
//!                 '.' after "Dr"         next is space
//! InSentence ───────────────────▶ InAbbreviationCandidate ──▶ InSentence
//!     │  │                                 │ otherwise
//!     │  │ '.', '!', '?'                   ▼
//!     │  └────────────────────────▶ AfterTerminator ──▶ boundary if followed by
//!     │                                                 end, or space + capital
//!     │ "..." / '…'                                     or opening quote
//!     └───────────────────▶ InEllipsis ──▶ boundary only if space + capital
//! ```
//!
//! Newlines are hard boundaries. The heuristic is language-agnostic: scripts
//! with their own terminators (Chinese `。`) come out as a single sentence
//! unless they also use Latin punctuation.

use unicode_segmentation::UnicodeSegmentation;

/// Titles that are always abbreviations, even when longer than the
/// short-token pattern allows.
pub const TITLE_ABBREVIATIONS: &[&str] = &["Dr", "Mr", "Mrs", "Ms", "Prof", "Sr", "Jr", "St"];

/// Longest capitalized token (`Xx`, `Xxx`) treated as an abbreviation.
const MAX_ABBREVIATION_LEN: usize = 3;

const CLOSERS: &[char] = &[
    '"', '\'', '\u{201D}', '\u{2019}', '\u{00BB}', '\u{203A}', '\u{300D}', '\u{300F}', ')', ']',
    '*', '_',
];

const OPENERS: &[char] = &[
    '"', '\'', '\u{201C}', '\u{2018}', '\u{00AB}', '\u{2039}', '\u{300C}', '\u{300E}', '(', '[',
    '\u{00BF}', '\u{00A1}', '*', '_',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InSentence,
    AfterTerminator,
    InAbbreviationCandidate,
    InEllipsis,
}

/// Punctuation-driven sentence splitter.
///
/// A period after a listed title (`Dr`, `St`, ...) or after any capitalized
/// word of at most three letters (`Xx`, `Xxx`) is read as an abbreviation
/// and does not end the sentence. Short proper nouns are caught by the same
/// rule: `"I went to Rio. It was fun."` stays one sentence.
///
/// ## Example
///
/// ```rust
/// use segmark::SentenceSplitter;
///
/// let splitter = SentenceSplitter::new();
/// let sentences = splitter.split("Dr. Smith went to St. Louis. He liked it!");
///
/// assert_eq!(sentences, ["Dr. Smith went to St. Louis.", "He liked it!"]);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: Vec<String>,
}

impl SentenceSplitter {
    /// Create a splitter with the default title abbreviations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            abbreviations: TITLE_ABBREVIATIONS.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Add abbreviations (without the trailing period) that never end a
    /// sentence when followed by a space.
    #[must_use]
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations.extend(extra.into_iter().map(Into::into));
        self
    }

    /// Split text into trimmed, non-empty sentences.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for line in text.lines() {
            self.split_line(line, &mut sentences);
        }
        sentences
    }

    fn split_line(&self, line: &str, out: &mut Vec<String>) {
        let graphemes: Vec<(usize, &str)> = line.grapheme_indices(true).collect();
        let scan = Scan {
            line,
            graphemes: &graphemes,
        };
        let n = graphemes.len();

        let mut state = State::InSentence;
        let mut start = 0;
        let mut i = 0;

        while i < n {
            let g = graphemes[i].1;
            state = match state {
                State::InSentence => {
                    i += 1;
                    self.classify_terminator(&scan, i - 1)
                }
                State::InAbbreviationCandidate => {
                    if is_space(g) {
                        State::InSentence
                    } else {
                        State::AfterTerminator
                    }
                }
                State::InEllipsis => {
                    if is_ellipsis_part(g) {
                        i += 1;
                        State::InEllipsis
                    } else {
                        if let Some(end) = scan.ellipsis_boundary(i) {
                            push_trimmed(out, &line[start..scan.byte(end)]);
                            start = scan.byte(end);
                            i = end;
                        }
                        State::InSentence
                    }
                }
                State::AfterTerminator => {
                    if let Some(end) = scan.terminator_boundary(i) {
                        push_trimmed(out, &line[start..scan.byte(end)]);
                        start = scan.byte(end);
                        i = end;
                    }
                    State::InSentence
                }
            };
        }

        push_trimmed(out, &line[start..]);
    }

    /// Decide what the grapheme at `i` starts, seen from `InSentence`.
    fn classify_terminator(&self, scan: &Scan<'_>, i: usize) -> State {
        match scan.grapheme(i) {
            Some("\u{2026}") => State::InEllipsis,
            Some(".") => {
                if scan.grapheme(i + 1) == Some(".") {
                    State::InEllipsis
                } else if scan.is_decimal_point(i) {
                    State::InSentence
                } else if self.is_abbreviation(scan.word_before(i)) {
                    State::InAbbreviationCandidate
                } else {
                    State::AfterTerminator
                }
            }
            Some("!" | "?") => State::AfterTerminator,
            _ => State::InSentence,
        }
    }

    fn is_abbreviation(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        if self.abbreviations.iter().any(|a| a == word) {
            return true;
        }
        let mut chars = word.chars();
        let short = word.chars().count() <= MAX_ABBREVIATION_LEN;
        short
            && chars.next().is_some_and(char::is_uppercase)
            && chars.all(char::is_lowercase)
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into sentences with the default rules.
///
/// ```rust
/// assert_eq!(segmark::split_sentences("The price is $99.99 today.").len(), 1);
/// assert!(segmark::split_sentences("   \n\n  ").is_empty());
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    SentenceSplitter::new().split(text)
}

/// Grapheme view of a single line.
struct Scan<'a> {
    line: &'a str,
    graphemes: &'a [(usize, &'a str)],
}

impl<'a> Scan<'a> {
    fn grapheme(&self, i: usize) -> Option<&'a str> {
        self.graphemes.get(i).map(|(_, g)| *g)
    }

    /// Byte offset of grapheme `i`, or the line length past the end.
    fn byte(&self, i: usize) -> usize {
        self.graphemes
            .get(i)
            .map_or(self.line.len(), |(offset, _)| *offset)
    }

    fn is_decimal_point(&self, i: usize) -> bool {
        i > 0
            && self.grapheme(i - 1).is_some_and(is_digit)
            && self.grapheme(i + 1).is_some_and(is_digit)
    }

    /// The run of letters immediately before grapheme `i`.
    fn word_before(&self, i: usize) -> &'a str {
        let mut k = i;
        while k > 0 && self.grapheme(k - 1).is_some_and(is_letter) {
            k -= 1;
        }
        &self.line[self.byte(k)..self.byte(i)]
    }

    fn skip_while(&self, mut i: usize, pred: impl Fn(&str) -> bool) -> usize {
        while self.grapheme(i).is_some_and(&pred) {
            i += 1;
        }
        i
    }

    /// Sentence end after a terminator whose next grapheme is `i`.
    fn terminator_boundary(&self, i: usize) -> Option<usize> {
        let end = self.skip_while(i, |g| is_terminator(g) || is_closer(g));
        match self.grapheme(end) {
            None => Some(end),
            Some(g) if is_space(g) => {
                let next = self.skip_while(end, is_space);
                match self.grapheme(next) {
                    None => Some(end),
                    Some(g) if starts_sentence(g) => Some(end),
                    Some(_) => None,
                }
            }
            Some(_) => None,
        }
    }

    /// Sentence end after an ellipsis whose next grapheme is `i`.
    fn ellipsis_boundary(&self, i: usize) -> Option<usize> {
        let end = self.skip_while(i, is_closer);
        if !self.grapheme(end).is_some_and(is_space) {
            return None;
        }
        let next = self.skip_while(end, is_space);
        self.grapheme(next)
            .is_some_and(|g| first_char(g).is_some_and(char::is_uppercase))
            .then_some(end)
    }
}

fn push_trimmed(out: &mut Vec<String>, sentence: &str) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn first_char(g: &str) -> Option<char> {
    g.chars().next()
}

fn is_space(g: &str) -> bool {
    first_char(g).is_some_and(char::is_whitespace)
}

fn is_digit(g: &str) -> bool {
    first_char(g).is_some_and(char::is_numeric)
}

fn is_letter(g: &str) -> bool {
    first_char(g).is_some_and(char::is_alphabetic)
}

fn is_terminator(g: &str) -> bool {
    matches!(g, "." | "!" | "?" | "\u{2026}")
}

fn is_ellipsis_part(g: &str) -> bool {
    matches!(g, "." | "\u{2026}")
}

fn is_closer(g: &str) -> bool {
    first_char(g).is_some_and(|c| CLOSERS.contains(&c))
}

/// Whether `g` can begin a new sentence: a capital, an opening quote, or a
/// letter from a script without case.
fn starts_sentence(g: &str) -> bool {
    first_char(g).is_some_and(|c| {
        c.is_uppercase()
            || OPENERS.contains(&c)
            || (c.is_alphabetic() && !c.is_lowercase() && !c.is_uppercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<String> {
        split_sentences(text)
    }

    #[test]
    fn test_basic_sentences() {
        assert_eq!(
            split("Hello world. How are you? I am fine!"),
            ["Hello world.", "How are you?", "I am fine!"]
        );
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(split("Dr. Smith went to St. Louis.").len(), 1);
        assert_eq!(split("Mrs. Jones met Prof. Plum. They talked.").len(), 2);
        assert_eq!(split("J. K. Rowling wrote it.").len(), 1);
    }

    #[test]
    fn test_abbreviation_at_end_of_line() {
        assert_eq!(split("He saw the Dr."), ["He saw the Dr."]);
    }

    #[test]
    fn test_decimal() {
        assert_eq!(split("The price is $99.99 today.").len(), 1);
        assert_eq!(split("Pi is 3.14. Nice.").len(), 2);
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(split("Well... maybe not."), ["Well... maybe not."]);
        assert_eq!(split("Wait... Then it hit."), ["Wait...", "Then it hit."]);
        assert_eq!(split("So\u{2026} Then."), ["So\u{2026}", "Then."]);
        assert_eq!(split("It ended..."), ["It ended..."]);
    }

    #[test]
    fn test_lowercase_continuation_is_not_boundary() {
        assert_eq!(split("See e.g. the list. Done."), ["See e.g. the list.", "Done."]);
        assert_eq!(split("it was fine. and then"), ["it was fine. and then"]);
    }

    #[test]
    fn test_quoted_dialogue() {
        assert_eq!(
            split("He said, \"Go home.\" Then he left."),
            ["He said, \"Go home.\"", "Then he left."]
        );
        assert_eq!(
            split("Stop. \u{201C}Why?\u{201D} she asked."),
            ["Stop.", "\u{201C}Why?\u{201D} she asked."]
        );
    }

    #[test]
    fn test_terminator_runs() {
        assert_eq!(split("Really?! Yes."), ["Really?!", "Yes."]);
    }

    #[test]
    fn test_newlines_are_hard_boundaries() {
        assert_eq!(split("first line\nsecond line"), ["first line", "second line"]);
    }

    #[test]
    fn test_cjk_without_latin_punctuation() {
        assert_eq!(split("你好。我很好。").len(), 1);
    }

    #[test]
    fn test_caseless_script_with_latin_punctuation() {
        assert_eq!(split("你好. 我很好."), ["你好.", "我很好."]);
    }

    #[test]
    fn test_empty_text() {
        assert!(split("").is_empty());
        assert!(split("   \n\n  ").is_empty());
    }

    #[test]
    fn test_short_capitalized_word_reads_as_abbreviation() {
        assert_eq!(split("I went to Rio. It was fun."), ["I went to Rio. It was fun."]);
        assert_eq!(split("I went to Paris. It was fun.").len(), 2);
        assert_eq!(split("I went to RIO. It was fun.").len(), 2);
    }

    #[test]
    fn test_custom_abbreviation() {
        let splitter = SentenceSplitter::new().with_abbreviations(["Capt"]);
        assert_eq!(splitter.split("Capt. Hook arrived.").len(), 1);
        assert_eq!(split("Capt. Hook arrived.").len(), 2);
    }
}
