//! Clause-level phrase splitting for phrase-aligned bilingual content.
//!
//! ```text
//! "When it rained, we stayed in; nobody minded."
//!   └──────────────┘└──────────────┘└──────────┘
//!    "When it rained, " "we stayed in; " "nobody minded."
//! ```
//!
//! Delimiters and the whitespace after them stay with the preceding phrase,
//! so concatenating the phrases gives back the sentence exactly.

const PHRASE_DELIMITERS: &[char] = &[
    ',', ';', ':', '\u{2014}', '\u{FF0C}', '\u{FF1B}', '\u{FF1A}', '\u{3001}',
];

/// Split a sentence at commas, semicolons, colons and em-dashes.
///
/// ```rust
/// use segmark::split_phrases;
///
/// let phrases = split_phrases("Hello, world; again");
/// assert_eq!(phrases, ["Hello, ", "world; ", "again"]);
/// assert_eq!(phrases.concat(), "Hello, world; again");
///
/// assert_eq!(split_phrases("No delimiters here."), ["No delimiters here."]);
/// ```
#[must_use]
pub fn split_phrases(sentence: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut current = String::new();
    let mut chars = sentence.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        current.push(c);
        let next = chars.peek().copied();
        if is_split_point(prev, c, next) {
            // Fold any further delimiters and the trailing whitespace in.
            while let Some(&n) = chars.peek() {
                if n.is_whitespace() || PHRASE_DELIMITERS.contains(&n) {
                    current.push(n);
                    chars.next();
                } else {
                    break;
                }
            }
            phrases.push(std::mem::take(&mut current));
        }
        prev = Some(c);
    }

    if !current.is_empty() {
        phrases.push(current);
    }
    phrases
}

fn is_split_point(prev: Option<char>, c: char, next: Option<char>) -> bool {
    if !PHRASE_DELIMITERS.contains(&c) {
        return false;
    }
    // Thousands separators and times: "1,000", "10:30".
    let between_digits = prev.is_some_and(|p| p.is_ascii_digit())
        && next.is_some_and(|n| n.is_ascii_digit());
    !between_digits
}
