//! Origin descriptors: which languages a document carries and how they align.
//!
//! ## Format
//!
//! ```text
//! primary[-secondary[-flag]]
//!
//! "en"        monolingual English, sentence mode
//! "en-vi"     English with Vietnamese, sentence-aligned
//! "en-vi-ph"  English with Vietnamese, phrase-aligned
//! ```
//!
//! The descriptor is parsed once per document. Parsing is lenient about
//! everything except the primary language, which must be present.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

/// Flag selecting phrase-level alignment.
const PHRASE_FLAG: &str = "ph";

/// Granularity of bilingual alignment, fixed per document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BilingualFormat {
    /// One content map per sentence.
    #[default]
    Sentence,
    /// An ordered list of phrase maps per segment.
    Phrase,
}

impl BilingualFormat {
    /// The wire name of this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Phrase => "phrase",
        }
    }
}

impl fmt::Display for BilingualFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed origin descriptor.
///
/// ```rust
/// use segmark::{BilingualFormat, Origin};
///
/// let origin: Origin = "en-vi-ph".parse().unwrap();
/// assert_eq!(origin.primary(), "en");
/// assert_eq!(origin.secondary(), Some("vi"));
/// assert_eq!(origin.format(), BilingualFormat::Phrase);
/// assert_eq!(origin.to_string(), "en-vi-ph");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    primary: String,
    secondary: Option<String>,
    format: BilingualFormat,
}

impl Origin {
    /// A monolingual origin in sentence mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPrimaryLanguage`] if `primary` is blank.
    pub fn monolingual(primary: &str) -> Result<Self> {
        let code = normalize_code(primary);
        if code.is_empty() {
            return Err(Error::EmptyPrimaryLanguage(primary.to_string()));
        }
        Ok(Self {
            primary: code,
            secondary: None,
            format: BilingualFormat::Sentence,
        })
    }

    /// A bilingual origin.
    ///
    /// A blank secondary code, or one equal to the primary, leaves the
    /// origin monolingual.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPrimaryLanguage`] if `primary` is blank.
    pub fn bilingual(primary: &str, secondary: &str, format: BilingualFormat) -> Result<Self> {
        let mut origin = Self::monolingual(primary)?;
        let secondary = normalize_code(secondary);
        if secondary == origin.primary {
            warn!(code = %secondary, "secondary language equals primary; treating as monolingual");
        } else if !secondary.is_empty() {
            origin.secondary = Some(secondary);
        }
        origin.format = format;
        Ok(origin)
    }

    /// Primary language code. Never empty.
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Secondary language code, if the document is bilingual.
    #[must_use]
    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    /// Alignment granularity.
    #[must_use]
    pub const fn format(&self) -> BilingualFormat {
        self.format
    }

    /// Whether a secondary language is configured.
    #[must_use]
    pub const fn is_bilingual(&self) -> bool {
        self.secondary.is_some()
    }

    /// Whether content is aligned at phrase granularity.
    #[must_use]
    pub fn is_phrase_mode(&self) -> bool {
        self.format == BilingualFormat::Phrase
    }
}

impl FromStr for Origin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('-');
        let primary = parts.next().unwrap_or_default();
        if primary.trim().is_empty() {
            return Err(Error::EmptyPrimaryLanguage(s.to_string()));
        }
        let secondary = parts.next().unwrap_or_default();
        let format = match parts.next().map(str::trim) {
            Some(flag) if flag.eq_ignore_ascii_case(PHRASE_FLAG) => BilingualFormat::Phrase,
            Some(flag) => {
                warn!(descriptor = s, flag, "unknown origin format flag; using sentence mode");
                BilingualFormat::Sentence
            }
            None => BilingualFormat::Sentence,
        };
        if parts.next().is_some() {
            warn!(descriptor = s, "ignoring extra origin descriptor parts");
        }
        Self::bilingual(primary, secondary, format)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary)?;
        match (&self.secondary, self.format) {
            (Some(secondary), BilingualFormat::Phrase) => write!(f, "-{secondary}-{PHRASE_FLAG}"),
            (Some(secondary), BilingualFormat::Sentence) => write!(f, "-{secondary}"),
            (None, BilingualFormat::Phrase) => write!(f, "--{PHRASE_FLAG}"),
            (None, BilingualFormat::Sentence) => Ok(()),
        }
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}
