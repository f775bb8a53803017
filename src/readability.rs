//! The five readability indices.
//!
//! Counting follows the textstat conventions: words are whitespace tokens with
//! punctuation removed, sentences use [`SentenceBoundary::Lexical`], and each
//! score is rounded the way textstat rounds it. Syllables come from a
//! vowel-group heuristic rather than a hyphenation dictionary, so scores track
//! textstat closely but are not bit-exact.

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::segment::{lexicon, SentenceBoundary};
use crate::HP;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Metric {
    #[serde(rename = "Flesch Reading Ease")]
    #[strum(serialize = "Flesch Reading Ease")]
    FleschReadingEase,
    #[serde(rename = "Flesch-Kincaid Grade Level")]
    #[strum(serialize = "Flesch-Kincaid Grade Level")]
    FleschKincaidGrade,
    #[serde(rename = "Gunning Fog")]
    #[strum(serialize = "Gunning Fog")]
    GunningFog,
    #[serde(rename = "SMOG Index")]
    #[strum(serialize = "SMOG Index")]
    SmogIndex,
    #[serde(rename = "Automated Readability Index")]
    #[strum(serialize = "Automated Readability Index")]
    AutomatedReadabilityIndex,
}

impl Metric {
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Scores for all five metrics. Serializes as an object keyed by metric label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReadabilityReport {
    #[serde(rename = "Flesch Reading Ease")]
    pub flesch_reading_ease: f64,
    #[serde(rename = "Flesch-Kincaid Grade Level")]
    pub flesch_kincaid_grade: f64,
    #[serde(rename = "Gunning Fog")]
    pub gunning_fog: f64,
    #[serde(rename = "SMOG Index")]
    pub smog_index: f64,
    #[serde(rename = "Automated Readability Index")]
    pub automated_readability_index: f64,
}

impl ReadabilityReport {
    pub fn score(&self, metric: Metric) -> f64 {
        match metric {
            Metric::FleschReadingEase => self.flesch_reading_ease,
            Metric::FleschKincaidGrade => self.flesch_kincaid_grade,
            Metric::GunningFog => self.gunning_fog,
            Metric::SmogIndex => self.smog_index,
            Metric::AutomatedReadabilityIndex => self.automated_readability_index,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::iter().map(move |m| (m, self.score(m)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStatistics {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub characters: usize,
    pub polysyllables: usize,
    pub complex_words: usize,
}

impl TextStatistics {
    pub fn collect(text: &str) -> Self {
        let words = lexicon(text);
        let syllables = words.iter().map(|w| syllable_count(w)).sum();
        let polysyllables = words
            .iter()
            .filter(|w| syllable_count(w) >= HP.polysyllable_min)
            .count();

        // Capitalization only marks a proper noun away from the sentence start,
        // so complex words are counted per sentence.
        let complex_words = SentenceBoundary::Lexical
            .segments(text)
            .into_iter()
            .map(|sentence| {
                lexicon(sentence)
                    .iter()
                    .enumerate()
                    .filter(|(i, w)| is_complex_word(w, *i == 0))
                    .count()
            })
            .sum();

        Self {
            words: words.len(),
            sentences: SentenceBoundary::Lexical.count(text),
            syllables,
            characters: text.chars().filter(|c| !c.is_whitespace()).count(),
            polysyllables,
            complex_words,
        }
    }
}

pub fn compute(text: &str) -> ReadabilityReport {
    let stats = TextStatistics::collect(text);
    debug!(
        words = stats.words,
        sentences = stats.sentences,
        syllables = stats.syllables,
        "readability statistics"
    );
    if stats.words == 0 || stats.sentences == 0 {
        return ReadabilityReport::default();
    }

    let words = stats.words as f64;
    let sentences = stats.sentences as f64;
    let words_per_sentence = words / sentences;
    let syllables_per_word = stats.syllables as f64 / words;

    let smog_index = if stats.sentences >= HP.smog_min_sentences {
        round_to(
            1.043 * (stats.polysyllables as f64 * 30.0 / sentences).sqrt() + 3.1291,
            1,
        )
    } else {
        0.0
    };

    ReadabilityReport {
        flesch_reading_ease: round_to(
            206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
            2,
        ),
        flesch_kincaid_grade: round_to(
            0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
            1,
        ),
        gunning_fog: round_to(
            0.4 * (words_per_sentence + 100.0 * stats.complex_words as f64 / words),
            2,
        ),
        smog_index,
        automated_readability_index: round_to(
            4.71 * (stats.characters as f64 / words) + 0.5 * words_per_sentence - 21.43,
            1,
        ),
    }
}

/// Vowel-group syllable estimate. Every token counts at least one syllable.
pub fn syllable_count(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    // Silent trailing 'e', except "-le" after a consonant ("table", "simple").
    let n = letters.len();
    if count > 1 && letters[n - 1] == 'e' {
        let le_ending = n >= 3 && letters[n - 2] == 'l' && !is_vowel(letters[n - 3]);
        if !le_ending {
            count -= 1;
        }
    }
    count.max(1)
}

fn is_complex_word(word: &str, sentence_start: bool) -> bool {
    if syllable_count(word) < HP.polysyllable_min {
        return false;
    }
    if !sentence_start && word.chars().next().is_some_and(char::is_uppercase) {
        return false;
    }
    let lower = word.to_lowercase();
    for suffix in ["es", "ed", "ing"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if !stem.is_empty() && syllable_count(stem) < HP.polysyllable_min {
                return false;
            }
        }
    }
    true
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllables() {
        assert_eq!(syllable_count("cat"), 1);
        assert_eq!(syllable_count("make"), 1);
        assert_eq!(syllable_count("table"), 2);
        assert_eq!(syllable_count("simple"), 2);
        assert_eq!(syllable_count("readability"), 5);
        assert_eq!(syllable_count("2024"), 1);
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(compute(""), ReadabilityReport::default());
        assert_eq!(compute("  ... !!"), ReadabilityReport::default());
    }

    #[test]
    fn simple_text_reads_easily() {
        let report = compute("The cat sat on the mat. The dog ran to the park. We had fun.");
        assert!(report.flesch_reading_ease > 90.0, "{report:?}");
        assert!(report.flesch_kincaid_grade < 3.0, "{report:?}");
        assert_eq!(report.smog_index, 3.1);
    }

    #[test]
    fn smog_needs_three_sentences() {
        let report = compute("Organizational restructuring necessitates communication.");
        assert_eq!(report.smog_index, 0.0);
        assert!(report.gunning_fog > 0.0);
    }

    #[test]
    fn inflections_and_names_are_not_complex() {
        let stats = TextStatistics::collect("We met Rodriguez there. Then we were traveling.");
        assert_eq!(stats.complex_words, 0, "{stats:?}");
    }

    #[test]
    fn common_polysyllables_are_complex() {
        // Familiar long words still count; there is no easy-word exemption.
        let stats = TextStatistics::collect("Everybody likes everybody here.");
        assert_eq!(stats.complex_words, 2, "{stats:?}");
        assert_eq!(stats.polysyllables, 2, "{stats:?}");
    }

    #[test]
    fn metric_labels_round_trip() {
        for metric in Metric::iter() {
            assert_eq!(metric.label().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!(Metric::SmogIndex.to_string(), "SMOG Index");
    }
}
