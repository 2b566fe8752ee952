//! Bilingual pairing: finding the translation next to each sentence.
//!
//! ## Delimiter Conventions
//!
//! Generated bilingual text embeds the secondary language in one of two
//! ways:
//!
//! ```text
//! Brace:  Hello world. {Xin chào thế giới.} How are you? {Bạn khỏe không?}
//!         └─ primary ─┘ └──── secondary ───┘ └─ primary ┘ └── secondary ──┘
//!
//! Slash:  The Lost Key / Chiếc Chìa Khóa Bị Mất
//! ```
//!
//! The brace convention is the canonical one for body text. The slash
//! convention is only consulted for titles and single-line blocks, where a
//! brace group would be unusual.
//!
//! ## Degradation
//!
//! | Input | Result |
//! |-------|--------|
//! | `text {translation}` | `{primary, secondary}` |
//! | `text {}` | `{primary, secondary: ""}` |
//! | `text` (no group) | `{primary}` |
//! | `text {unclosed` | `{primary: "text unclosed"}` |
//!
//! ## Phrase Alignment
//!
//! In phrase mode both sides are cut into phrases and paired by index.
//! Nothing is realigned: when the counts differ, the first `min(n, m)`
//! entries are fully paired and the surplus phrases of the longer side are
//! kept as further entries with `""` for the other language.
//!
//! ```text
//! primary:   ["When it rained,", "we stayed in."]
//! secondary: ["Khi trời mưa,", "chúng tôi,", "ở nhà."]
//!
//! [ {en: "When it rained,", vi: "Khi trời mưa,"},
//!   {en: "we stayed in.",   vi: "chúng tôi,"},
//!   {en: "",                vi: "ở nhà."} ]
//! ```

use tracing::{trace, warn};

use crate::content::{Content, PhraseMap, TextMap};
use crate::origin::Origin;
use crate::phrase::split_phrases;
use crate::sentence::SentenceSplitter;

/// A primary-language span and the translation that followed it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Primary-language text, trimmed.
    pub primary: String,
    /// Brace-enclosed secondary text, trimmed. `Some("")` for `{}`.
    pub secondary: Option<String>,
}

impl Run {
    fn new(primary: &str, secondary: Option<&str>) -> Self {
        Self {
            primary: primary.trim().to_string(),
            secondary: secondary.map(|s| s.trim().to_string()),
        }
    }
}

/// Scan a line for `primary {secondary}` groups.
///
/// Text with no group after it becomes a primary-only run. An unclosed `{`
/// turns the rest of the line into primary text; a stray `}` is dropped.
///
/// ```rust
/// use segmark::brace_runs;
///
/// let runs = brace_runs("One. {Một.} Two. {Hai.} Tail.");
/// assert_eq!(runs.len(), 3);
/// assert_eq!(runs[1].primary, "Two.");
/// assert_eq!(runs[1].secondary.as_deref(), Some("Hai."));
/// assert_eq!(runs[2].secondary, None);
/// ```
#[must_use]
pub fn brace_runs(line: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut primary = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut depth = 1usize;
                let mut inner = String::new();
                for c in chars.by_ref() {
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => inner.push(c),
                    }
                }
                if depth == 0 {
                    attach_group(&mut runs, &primary, &inner);
                    primary.clear();
                } else {
                    warn!(line, "unbalanced brace; keeping text as primary only");
                    primary.push_str(&inner);
                }
            }
            '}' => warn!(line, "dropping stray closing brace"),
            _ => primary.push(c),
        }
    }

    if !primary.trim().is_empty() {
        runs.push(Run::new(&primary, None));
    }
    runs
}

fn attach_group(runs: &mut Vec<Run>, primary: &str, secondary: &str) {
    if !primary.trim().is_empty() {
        runs.push(Run::new(primary, Some(secondary)));
        return;
    }
    let secondary = secondary.trim();
    match runs.last_mut().and_then(|run| run.secondary.as_mut()) {
        Some(previous) => {
            if !secondary.is_empty() {
                if !previous.is_empty() {
                    previous.push(' ');
                }
                previous.push_str(secondary);
            }
        }
        None => warn!(secondary, "translation with no preceding text; dropped"),
    }
}

/// Number of `{` still open at the end of `text`. Stray `}` are ignored.
pub(crate) fn open_braces(text: &str) -> usize {
    text.chars().fold(0usize, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth.saturating_sub(1),
        _ => depth,
    })
}

/// Split `primary / secondary` at the first spaced slash.
///
/// ```rust
/// use segmark::split_slash;
///
/// assert_eq!(split_slash("The Key / Chìa Khóa"), Some(("The Key", "Chìa Khóa")));
/// assert_eq!(split_slash("either/or"), None);
/// ```
#[must_use]
pub fn split_slash(line: &str) -> Option<(&str, &str)> {
    let (primary, secondary) = line.split_once(" / ")?;
    let primary = primary.trim();
    (!primary.is_empty()).then(|| (primary, secondary.trim()))
}

/// Turns cleaned lines into language-keyed content for one origin.
#[derive(Debug, Clone)]
pub struct BilingualPairer {
    origin: Origin,
    splitter: SentenceSplitter,
}

impl BilingualPairer {
    /// Create a pairer with the default sentence splitter.
    #[must_use]
    pub fn new(origin: Origin) -> Self {
        Self::with_splitter(origin, SentenceSplitter::new())
    }

    /// Create a pairer with a custom sentence splitter.
    #[must_use]
    pub fn with_splitter(origin: Origin, splitter: SentenceSplitter) -> Self {
        Self { origin, splitter }
    }

    /// The origin this pairer targets.
    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Pair one cleaned line of body text into ordered content units.
    ///
    /// ```rust
    /// use segmark::{BilingualPairer, Content};
    ///
    /// let pairer = BilingualPairer::new("en-vi".parse().unwrap());
    /// let units = pairer.pair_line("Hello world. {Xin chào thế giới.}");
    ///
    /// let Content::Sentence(map) = &units[0] else { unreachable!() };
    /// assert_eq!(map["en"], "Hello world.");
    /// assert_eq!(map["vi"], "Xin chào thế giới.");
    /// ```
    #[must_use]
    pub fn pair_line(&self, line: &str) -> Vec<Content> {
        if !self.origin.is_bilingual() {
            return self.monolingual(line);
        }

        let mut units = Vec::new();
        for run in brace_runs(line) {
            match run.secondary {
                Some(secondary) => self.pair_run(&run.primary, &secondary, &mut units),
                None => units.extend(self.monolingual(&run.primary)),
            }
        }
        trace!(line, units = units.len(), "paired line");
        units
    }

    /// Pair a single line written with the slash convention.
    ///
    /// Returns `None` when the origin is monolingual, the line has a brace
    /// group, or no spaced slash is present.
    #[must_use]
    pub fn pair_slash_line(&self, line: &str) -> Option<Content> {
        if !self.origin.is_bilingual() || line.contains('{') {
            return None;
        }
        let (primary, secondary) = split_slash(line)?;
        Some(self.unit_content(primary, Some(secondary)))
    }

    /// Pair already-split units, one content value per unit.
    ///
    /// Brace groups inside a unit become its secondary text; a unit with no
    /// group stays primary-only.
    #[must_use]
    pub fn pair(&self, units: &[String]) -> Vec<Content> {
        units
            .iter()
            .filter(|unit| !unit.trim().is_empty())
            .map(|unit| {
                if !self.origin.is_bilingual() {
                    return self.unit_content(unit, None);
                }
                let runs = brace_runs(unit);
                let primary = join(runs.iter().map(|r| r.primary.as_str()));
                let secondary = runs
                    .iter()
                    .any(|r| r.secondary.is_some())
                    .then(|| join(runs.iter().filter_map(|r| r.secondary.as_deref())));
                self.unit_content(&primary, secondary.as_deref())
            })
            .collect()
    }

    /// Pair a title: brace groups first, then the slash convention, else the
    /// whole text as primary.
    ///
    /// ```rust
    /// use segmark::BilingualPairer;
    ///
    /// let pairer = BilingualPairer::new("en-vi".parse().unwrap());
    /// let title = pairer.pair_title("The Key / Chìa Khóa");
    /// assert_eq!(title["en"], "The Key");
    /// assert_eq!(title["vi"], "Chìa Khóa");
    /// ```
    #[must_use]
    pub fn pair_title(&self, text: &str) -> TextMap {
        let text = text.trim();
        let mut title = TextMap::new();
        let primary_key = self.origin.primary().to_string();

        let Some(secondary_key) = self.origin.secondary() else {
            title.insert(primary_key, text.to_string());
            return title;
        };

        let runs = brace_runs(text);
        if runs.iter().any(|r| r.secondary.is_some()) {
            title.insert(primary_key, join(runs.iter().map(|r| r.primary.as_str())));
            title.insert(
                secondary_key.to_string(),
                join(runs.iter().filter_map(|r| r.secondary.as_deref())),
            );
        } else if let Some((primary, secondary)) = split_slash(text) {
            title.insert(primary_key, primary.to_string());
            title.insert(secondary_key.to_string(), secondary.to_string());
        } else {
            title.insert(primary_key, text.to_string());
        }
        title
    }

    fn monolingual(&self, text: &str) -> Vec<Content> {
        self.splitter
            .split(text)
            .iter()
            .map(|sentence| self.unit_content(sentence, None))
            .collect()
    }

    /// A run with a translation: one unit, or one unit per sentence when
    /// both sides have the same number of sentences. An empty translation
    /// gives every primary sentence its own unit with an empty secondary.
    fn pair_run(&self, primary: &str, secondary: &str, units: &mut Vec<Content>) {
        let primary_sentences = self.splitter.split(primary);
        if secondary.trim().is_empty() {
            for p in &primary_sentences {
                units.push(self.unit_content(p, Some("")));
            }
            return;
        }
        let secondary_sentences = self.splitter.split(secondary);
        if primary_sentences.len() > 1 && primary_sentences.len() == secondary_sentences.len() {
            for (p, s) in primary_sentences.iter().zip(&secondary_sentences) {
                units.push(self.unit_content(p, Some(s)));
            }
        } else {
            units.push(self.unit_content(primary, Some(secondary)));
        }
    }

    fn unit_content(&self, primary: &str, secondary: Option<&str>) -> Content {
        let primary_key = self.origin.primary();
        let secondary = secondary.zip(self.origin.secondary());

        if !self.origin.is_phrase_mode() {
            let mut map = TextMap::new();
            map.insert(primary_key.to_string(), primary.trim().to_string());
            if let Some((text, key)) = secondary {
                map.insert(key.to_string(), text.trim().to_string());
            }
            return Content::Sentence(map);
        }

        let primary_phrases = self.phrases(primary);
        let phrases = match secondary {
            Some((text, key)) => align_phrases(primary_key, &primary_phrases, key, &self.phrases(text)),
            None => primary_phrases
                .into_iter()
                .map(|p| PhraseMap::from([(primary_key.to_string(), p)]))
                .collect(),
        };
        Content::Phrase(phrases)
    }

    fn phrases(&self, text: &str) -> Vec<String> {
        self.splitter
            .split(text)
            .iter()
            .flat_map(|sentence| split_phrases(sentence))
            .map(|phrase| phrase.trim().to_string())
            .filter(|phrase| !phrase.is_empty())
            .collect()
    }
}

/// Pair phrases by index, padding the shorter side with `""`.
#[must_use]
pub fn align_phrases(
    primary_key: &str,
    primary: &[String],
    secondary_key: &str,
    secondary: &[String],
) -> Vec<PhraseMap> {
    let paired = primary.len().min(secondary.len());
    if primary.len() != secondary.len() {
        trace!(
            primary = primary.len(),
            secondary = secondary.len(),
            paired,
            "phrase counts differ; padding the shorter side"
        );
    }
    (0..primary.len().max(secondary.len()))
        .map(|i| {
            PhraseMap::from([
                (
                    primary_key.to_string(),
                    primary.get(i).cloned().unwrap_or_default(),
                ),
                (
                    secondary_key.to_string(),
                    secondary.get(i).cloned().unwrap_or_default(),
                ),
            ])
        })
        .collect()
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
