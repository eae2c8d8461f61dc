//! Intent vectorizer
//!
//! Tokenizes free text and mean-pools per-token embeddings into one sentence
//! vector. Pure and deterministic: identical input always yields identical
//! tokens and an identical vector.

use dashmap::DashMap;
use std::sync::Arc;

use super::table::WordTable;

/// Upper bound on cached sentence vectors.
///
/// Cache keys are caller-supplied query text, so growth must be bounded;
/// once full, new texts are vectorized without being cached.
const CACHE_CAPACITY: usize = 1024;

/// Split text into maximal runs of Unicode letters/digits, lowercased
///
/// Punctuation-only or empty input yields an empty sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Sentence vectorizer over a shared word table, with caching
///
/// Wraps the table with a DashMap cache so repeated intents (the common case
/// on a dashboard) skip the pooling pass.
pub struct Vectorizer {
    table: Arc<WordTable>,
    cache: DashMap<String, Vec<f32>>,
}

impl Vectorizer {
    /// Create a vectorizer over an immutable word table
    pub fn new(table: Arc<WordTable>) -> Self {
        Self {
            table,
            cache: DashMap::new(),
        }
    }

    /// Vectorize text into the element-wise mean of its token vectors
    ///
    /// Unknown tokens contribute the zero vector; an empty token sequence
    /// yields the zero vector of dimension D, so the result is always defined.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        if let Some(cached) = self.cache.get(text) {
            return cached.clone();
        }

        let vector = self.pool(text);
        if self.cache.len() < CACHE_CAPACITY {
            self.cache.insert(text.to_string(), vector.clone());
        }
        vector
    }

    fn pool(&self, text: &str) -> Vec<f32> {
        let dimension = self.table.dimension();
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; dimension];
        }

        let mut sum = vec![0.0; dimension];
        for token in &tokens {
            for (acc, value) in sum.iter_mut().zip(self.table.lookup(token)) {
                *acc += value;
            }
        }

        let count = tokens.len() as f32;
        for acc in &mut sum {
            *acc /= count;
        }
        sum
    }

    /// The underlying word table
    pub fn table(&self) -> &WordTable {
        &self.table
    }

    /// Embedding dimension D
    pub fn dimension(&self) -> usize {
        self.table.dimension()
    }

    /// Number of cached sentence vectors
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_vectorizer() -> Vectorizer {
        let table = WordTable::from_entries(
            [
                ("scrape".to_string(), vec![1.0, 0.0, 0.0, 0.0]),
                ("news".to_string(), vec![0.0, 1.0, 0.0, 0.0]),
            ],
            4,
        );
        Vectorizer::new(Arc::new(table))
    }

    #[test]
    fn test_tokenize_splits_on_non_alphanumeric() {
        assert_eq!(tokenize("Scrape the news!"), vec!["scrape", "the", "news"]);
    }

    #[test]
    fn test_tokenize_keeps_digits() {
        assert_eq!(tokenize("top-10 stories"), vec!["top", "10", "stories"]);
    }

    #[test]
    fn test_tokenize_punctuation_only_is_empty() {
        assert!(tokenize("?!, --- ...").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_vectorize_empty_text_is_zero_vector() {
        let vectorizer = fixture_vectorizer();
        assert_eq!(vectorizer.vectorize(""), vec![0.0; 4]);
    }

    #[test]
    fn test_vectorize_case_and_punctuation_invariant() {
        let vectorizer = fixture_vectorizer();
        assert_eq!(
            vectorizer.vectorize("Hello, World!"),
            vectorizer.vectorize("hello world")
        );
    }

    #[test]
    fn test_vectorize_means_token_vectors() {
        let vectorizer = fixture_vectorizer();
        // "the" is unknown and contributes the zero vector to the mean
        let vector = vectorizer.vectorize("Scrape the news!");
        let third = 1.0 / 3.0;
        assert!((vector[0] - third).abs() < 1e-6);
        assert!((vector[1] - third).abs() < 1e-6);
        assert_eq!(&vector[2..], &[0.0, 0.0]);
    }

    #[test]
    fn test_vectorize_caches_results() {
        let vectorizer = fixture_vectorizer();
        assert_eq!(vectorizer.cache_size(), 0);
        let first = vectorizer.vectorize("scrape news");
        let second = vectorizer.vectorize("scrape news");
        assert_eq!(first, second);
        assert_eq!(vectorizer.cache_size(), 1);
    }

    #[test]
    fn test_cache_stops_growing_at_capacity() {
        let vectorizer = fixture_vectorizer();
        for i in 0..(CACHE_CAPACITY + 50) {
            vectorizer.vectorize(&format!("query number {i}"));
        }
        assert_eq!(vectorizer.cache_size(), CACHE_CAPACITY);

        // Uncached texts are still vectorized correctly
        let vector = vectorizer.vectorize("scrape");
        assert_eq!(vector, vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(vectorizer.cache_size(), CACHE_CAPACITY);
    }
}
