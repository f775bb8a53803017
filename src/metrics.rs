use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::segment::SentenceBoundary;
use crate::HP;

static PERSUASIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "achieve",
        "improve",
        "success",
        "lead",
        "benefit",
        "gain",
        "increase",
        "advance",
        "innovate",
        "optimize",
        "develop",
        "drive",
        "enhance",
        "execute",
        "outperform",
        "transform",
        "exceed",
        "pioneer",
        "succeed",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasicMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub average_word_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClarityReport {
    pub long_sentences: usize,
    pub total_sentences: usize,
    pub percentage: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementReport {
    pub persuasive_words: usize,
    pub total_words: usize,
    pub percentage: f64,
    /// Matched tokens, lowercased, in text order.
    pub matches: Vec<String>,
    pub message: String,
}

pub fn basic(text: &str) -> BasicMetrics {
    let words: Vec<&str> = text.split_whitespace().collect();
    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let average_word_length = if words.is_empty() {
        0.0
    } else {
        total_chars as f64 / words.len() as f64
    };
    BasicMetrics {
        word_count: words.len(),
        sentence_count: SentenceBoundary::Terminal.count(text),
        average_word_length,
    }
}

pub fn clarity(text: &str) -> ClarityReport {
    let sentences = SentenceBoundary::Period.segments(text);
    let total = sentences.len();
    let long = sentences
        .iter()
        .filter(|s| s.split_whitespace().count() > HP.long_sentence_words)
        .count();
    let percentage = percent(long, total);

    ClarityReport {
        long_sentences: long,
        total_sentences: total,
        percentage,
        message: format!(
            "{long} out of {total} sentences are too long. \
             This is {percentage:.2}% of the text. \
             Consider simplifying or splitting long sentences."
        ),
    }
}

/// Persuasive-word density. Tokens match only when their lowercase form equals
/// a lexicon entry exactly, so "achieve." does not count.
pub fn engagement(text: &str) -> EngagementReport {
    let words: Vec<&str> = text.split_whitespace().collect();
    let matches: Vec<String> = words
        .iter()
        .map(|w| w.to_lowercase())
        .filter(|w| PERSUASIVE_WORDS.contains(w.as_str()))
        .collect();
    let count = matches.len();
    let percentage = percent(count, words.len());

    EngagementReport {
        persuasive_words: count,
        total_words: words.len(),
        percentage,
        matches,
        message: format!(
            "{count} persuasive words used, making up {percentage:.2}% of the text. \
             Consider using more persuasive language to enhance engagement."
        ),
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
