//! Sentence boundary strategies.
//!
//! The metrics disagree on what a sentence is, so each one names the
//! strategy it counts with instead of splitting text ad hoc.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::HP;

static LEXICAL_SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[^.!?]+[.!?]*").unwrap());

static PUNCTUATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s']").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceBoundary {
    /// Every '.', '!' or '?' character ends a sentence, so "..." counts three times.
    Terminal,
    /// Only '.' separates sentences. Blank segments are dropped.
    Period,
    /// A run starting at a word boundary and ending with terminal punctuation.
    /// Fragments of two words or fewer are not counted as sentences.
    Lexical,
}

impl SentenceBoundary {
    pub fn segments(self, text: &str) -> Vec<&str> {
        match self {
            Self::Terminal => text
                .split(['.', '!', '?'])
                .filter(|s| !s.trim().is_empty())
                .collect(),
            Self::Period => text.split('.').filter(|s| !s.trim().is_empty()).collect(),
            Self::Lexical => LEXICAL_SENTENCE_RE
                .find_iter(text)
                .map(|m| m.as_str())
                .collect(),
        }
    }

    /// `Terminal` counts punctuation characters rather than segments, and
    /// `Lexical` never reports fewer than one sentence.
    pub fn count(self, text: &str) -> usize {
        match self {
            Self::Terminal => text
                .chars()
                .filter(|c| matches!(c, '.' | '!' | '?'))
                .count(),
            Self::Period => self.segments(text).len(),
            Self::Lexical => {
                let segments = self.segments(text);
                let fragments = segments
                    .iter()
                    .filter(|s| lexicon(s).len() <= HP.lexical_fragment_max_words)
                    .count();
                segments.len().saturating_sub(fragments).max(1)
            }
        }
    }
}

/// Whitespace tokens with punctuation removed (apostrophes survive).
/// Tokens made only of punctuation disappear.
pub fn lexicon(text: &str) -> Vec<String> {
    PUNCTUATION_RE
        .replace_all(text, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
