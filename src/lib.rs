use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

pub mod error;
pub mod keywords;
pub mod metrics;
pub mod readability;
pub mod render;
pub mod segment;
pub mod tooltip;

pub use error::{AnalyzerError, Result};
pub use keywords::{Embedder, HashingEmbedder, Keyword, KeywordExtractor};
pub use metrics::{BasicMetrics, ClarityReport, EngagementReport};
pub use readability::{Metric, ReadabilityReport};
pub use segment::SentenceBoundary;
pub use tooltip::Explanation;

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

struct Hyperparameters {
    long_sentence_words: usize,
    lexical_fragment_max_words: usize,
    polysyllable_min: usize,
    smog_min_sentences: usize,
    keyword_ngram_min: usize,
    keyword_ngram_max: usize,
    keyword_top_n: usize,
    keyword_relevance_decimals: i32,
    embedding_dimension: usize,
    embedding_batch_size: usize,
    embedding_secondary_weight: f32,
    embedding_bigram_weight: f32,
}

static HP: Hyperparameters = Hyperparameters {
    long_sentence_words: 20,
    lexical_fragment_max_words: 2,
    polysyllable_min: 3,
    smog_min_sentences: 3,
    keyword_ngram_min: 1,
    keyword_ngram_max: 3,
    keyword_top_n: 5,
    keyword_relevance_decimals: 4,
    embedding_dimension: 384,
    embedding_batch_size: 256,
    embedding_secondary_weight: 0.5,
    embedding_bigram_weight: 0.8,
};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub readability: ReadabilityReport,
    pub explanations: BTreeMap<Metric, Explanation>,
    pub keywords: Vec<Keyword>,
    pub basic: BasicMetrics,
    pub clarity: ClarityReport,
    pub engagement: EngagementReport,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Clones share the embedding model.
#[derive(Clone)]
pub struct Analyzer {
    extractor: KeywordExtractor,
}

impl Analyzer {
    pub fn new(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    /// Blank text is rejected with [`AnalyzerError::EmptyInput`] before any
    /// component runs. A failing embedding model only empties the keyword
    /// list and adds a warning.
    pub fn analyze(&self, text: &str) -> Result<AnalysisReport> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }
        debug!(chars = text.len(), "analyzing text");

        let readability = readability::compute(text);
        let explanations = readability
            .iter()
            .map(|(metric, score)| (metric, metric.describe(score)))
            .collect();

        let mut warnings = Vec::new();
        let keywords = match self.extractor.extract(text) {
            Ok(keywords) => keywords,
            Err(e) => {
                warn!(error = %e, "keyword extraction failed");
                warnings.push(format!("Keyword extraction unavailable: {e}"));
                Vec::new()
            }
        };

        Ok(AnalysisReport {
            readability,
            explanations,
            keywords,
            basic: metrics::basic(text),
            clarity: metrics::clarity(text),
            engagement: metrics::engagement(text),
            warnings,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(KeywordExtractor::new(Arc::new(HashingEmbedder::default())))
    }
}
