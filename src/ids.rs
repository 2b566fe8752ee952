//! Identifier generation for segments and chapters.
//!
//! Identifiers come from a collaborator so the engine stays a pure function
//! of its input. Two implementations are provided:
//!
//! | Generator | Output | Use |
//! |-----------|--------|-----|
//! | [`UuidIds`] | random UUID v4 | production, globally unique |
//! | [`SequentialIds`] | `prefix-0`, `prefix-1`, ... | tests, reproducible output |

use std::sync::atomic::{AtomicU64, Ordering};

/// A source of unique identifiers.
///
/// Implementations must never return the same value twice and must be safe
/// to call from concurrent parses.
pub trait IdGenerator: Send + Sync {
    /// Return a fresh identifier.
    fn next_id(&self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Counter-based identifiers with a fixed prefix.
///
/// ```rust
/// use segmark::{IdGenerator, SequentialIds};
///
/// let ids = SequentialIds::new("seg");
/// assert_eq!(ids.next_id(), "seg-0");
/// assert_eq!(ids.next_id(), "seg-1");
/// ```
#[derive(Debug, Default)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    /// Start counting from zero.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
