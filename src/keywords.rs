//! Embedding-based keyphrase extraction.
//!
//! Candidates are the unique 1-3 word n-grams of the document once English
//! stop words are removed. Each candidate is ranked by the cosine similarity
//! of its embedding to the embedding of the whole document.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{AnalyzerError, Result};
use crate::HP;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
        "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
        "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
        "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
        "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt",
        "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
        "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
        "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
        "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
        "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
        "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
        "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
        "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
        "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
        "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
        "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so",
        "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
        "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them",
        "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
        "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those",
        "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
        "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
        "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
        "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
        "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

fn content_tokens(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|t| !STOPWORDS.contains(t.as_str()))
        .collect()
}

pub fn candidate_phrases(text: &str) -> BTreeSet<String> {
    let tokens = content_tokens(text);
    let mut candidates = BTreeSet::new();
    for n in HP.keyword_ngram_min..=HP.keyword_ngram_max {
        for gram in tokens.windows(n) {
            candidates.insert(gram.join(" "));
        }
    }
    candidates
}

// ---------------------------------------------------------------------------
// Embedding model
// ---------------------------------------------------------------------------

/// A sentence-embedding model. Implementations are loaded once and shared
/// read-only between analyses, so `embed` must be callable concurrently.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

/// Hashed bag-of-tokens embedding with adjacent-token bigram features.
///
/// Deterministic and dependency-free; phrases that share vocabulary with a
/// document land close to it.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn bucket(&self, feature: &str) -> (usize, usize) {
        let mut hasher = DefaultHasher::new();
        feature.hash(&mut hasher);
        let hash = hasher.finish();
        let dim = self.dimension as u64;
        ((hash % dim) as usize, ((hash >> 32) % dim) as usize)
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let tokens = content_tokens(text);
        let mut embedding = vec![0.0f32; self.dimension];

        for token in &tokens {
            let (primary, secondary) = self.bucket(token);
            embedding[primary] += 1.0;
            embedding[secondary] += HP.embedding_secondary_weight;
        }
        for pair in tokens.windows(2) {
            let (idx, _) = self.bucket(&pair.join(" "));
            embedding[idx] += HP.embedding_bigram_weight;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for val in embedding.iter_mut() {
                *val /= magnitude;
            }
        }
        embedding
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(HP.embedding_dimension)
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub phrase: String,
    pub relevance: f64,
}

#[derive(Clone)]
pub struct KeywordExtractor {
    embedder: Arc<dyn Embedder>,
    top_n: usize,
}

impl KeywordExtractor {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            top_n: HP.keyword_top_n,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Best-first keyphrases. Text without candidates yields an empty list
    /// and never reaches the embedder.
    pub fn extract(&self, text: &str) -> Result<Vec<Keyword>> {
        let candidates = candidate_phrases(text);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let document = self
            .embed_batch(&[text])?
            .pop()
            .ok_or_else(|| AnalyzerError::Embedding("no document embedding".to_string()))?;

        // Candidates are embedded a batch at a time so long documents never
        // hold every phrase vector at once.
        let phrases: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let mut scored: Vec<(String, f32)> = Vec::with_capacity(phrases.len());
        for batch in phrases.chunks(HP.embedding_batch_size) {
            let embeddings = self.embed_batch(batch)?;
            for (phrase, e) in batch.iter().zip(&embeddings) {
                let sim = cosine_similarity(&document, e);
                let sim = if sim.is_nan() { 0.0 } else { sim.clamp(0.0, 1.0) };
                scored.push((phrase.to_string(), sim));
            }
        }
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(self.top_n);
        debug!(keywords = scored.len(), "keyphrases ranked");

        let factor = 10f64.powi(HP.keyword_relevance_decimals);
        Ok(scored
            .into_iter()
            .map(|(phrase, sim)| Keyword {
                phrase,
                relevance: (sim as f64 * factor).round() / factor,
            })
            .collect())
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let embeddings = self.embedder.embed(texts)?;
        if embeddings.len() != texts.len() {
            return Err(AnalyzerError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingEmbedder {
        inner: HashingEmbedder,
        batches: Mutex<Vec<usize>>,
    }

    impl Embedder for RecordingEmbedder {
        fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            self.batches.lock().unwrap().push(texts.len());
            self.inner.embed(texts)
        }
    }

    struct ShortEmbedder;

    impl Embedder for ShortEmbedder {
        fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(Vec::new())
        }
    }

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Err(AnalyzerError::Embedding("model not loaded".to_string()))
        }
    }

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new(Arc::new(HashingEmbedder::default()))
    }

    #[test]
    fn candidates_skip_stop_words_and_span_them() {
        let candidates = candidate_phrases("The cat and the dog");
        let expected: BTreeSet<String> = ["cat", "dog", "cat dog"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(candidates, expected);
    }

    #[test]
    fn single_letter_tokens_are_not_candidates() {
        assert!(candidate_phrases("a b c I").is_empty());
    }

    #[test]
    fn empty_text_has_no_keywords() {
        assert!(extractor().extract("").unwrap().is_empty());
        // The embedder is never consulted when there is nothing to rank.
        let failing = KeywordExtractor::new(Arc::new(FailingEmbedder));
        assert!(failing.extract("the of and").unwrap().is_empty());
    }

    #[test]
    fn embedder_failure_surfaces() {
        let failing = KeywordExtractor::new(Arc::new(FailingEmbedder));
        assert_eq!(
            failing.extract("Rust compilers"),
            Err(AnalyzerError::Embedding("model not loaded".to_string()))
        );
    }

    #[test]
    fn default_returns_five_ranked() {
        let text = "Rust makes systems programming safer. Memory safety without \
                    garbage collection attracts systems engineers.";
        let keywords = extractor().extract(text).unwrap();
        assert_eq!(keywords.len(), 5);
        for pair in keywords.windows(2) {
            assert!(pair[0].relevance >= pair[1].relevance);
        }
        for k in &keywords {
            assert!((0.0..=1.0).contains(&k.relevance));
            assert!((1..=3).contains(&k.phrase.split(' ').count()));
        }
    }

    #[test]
    fn embeddings_are_unit_length() {
        let e = HashingEmbedder::new(64).embed(&["search engine optimization"]).unwrap();
        let norm: f32 = e[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert_eq!(e[0].len(), 64);
    }

    #[test]
    fn long_documents_embed_in_batches() {
        let text: Vec<String> = (0..200).map(|i| format!("term{i}")).collect();
        let text = text.join(" ");
        let recorder = Arc::new(RecordingEmbedder::default());
        let keywords = KeywordExtractor::new(recorder.clone())
            .extract(&text)
            .unwrap();
        assert_eq!(keywords.len(), 5);

        let batches = recorder.batches.lock().unwrap().clone();
        // Document first, then 597 candidates in batches.
        assert_eq!(batches, vec![1, 256, 256, 85]);
        assert!(batches.iter().all(|&n| n <= HP.embedding_batch_size));

        let direct = extractor().extract(&text).unwrap();
        assert_eq!(keywords, direct);
    }

    #[test]
    fn missing_embeddings_are_an_error() {
        let short = KeywordExtractor::new(Arc::new(ShortEmbedder));
        assert_eq!(
            short.extract("search ranking"),
            Err(AnalyzerError::Embedding(
                "expected 1 embeddings, got 0".to_string()
            ))
        );
    }

    #[test]
    fn top_n_is_configurable() {
        assert_eq!(extractor().top_n(), 5);
        let narrow = extractor().with_top_n(2);
        assert_eq!(narrow.top_n(), 2);
        let text = "Rust makes systems programming safer and faster.";
        assert_eq!(narrow.extract(text).unwrap().len(), 2);
    }
}
