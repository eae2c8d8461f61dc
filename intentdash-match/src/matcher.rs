//! Similarity ranking and the matching facade
//!
//! Scores a query vector against the catalog with cosine similarity and picks
//! the best record. Matching is total: empty catalogs, unknown tokens, and
//! zero vectors all degrade to a defined low-information result instead of
//! an error.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::embedding::{Vectorizer, WordTable};

/// Cosine similarity between two vectors, in [-1, 1]
///
/// Length mismatch and zero-magnitude operands are defined degenerate cases
/// that score 0.0 rather than failing.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Outcome of matching one intent against the catalog
///
/// `matched_project == None` is the no-match sentinel: a defined result, not
/// an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// The query text as received
    pub intent: String,
    /// Matched project identifier, or None when nothing was selected
    pub matched_project: Option<String>,
    /// Parameter reference of the matched record
    pub params: Option<String>,
    /// Cosine similarity of the winning record, in [-1, 1]
    pub similarity: f32,
}

impl MatchResult {
    /// The no-match sentinel for a query
    pub fn no_match(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            matched_project: None,
            params: None,
            similarity: 0.0,
        }
    }

    /// Whether a catalog record was selected
    pub fn is_match(&self) -> bool {
        self.matched_project.is_some()
    }
}

/// Matcher tuning
#[derive(Debug, Clone, Default)]
pub struct MatcherConfig {
    /// Similarity below this yields the no-match sentinel. None disables the
    /// gate and the best record always wins.
    pub min_similarity: Option<f32>,
}

/// Select the best catalog record for a query vector
///
/// Linear scan keeping the strictly greatest similarity seen so far, seeded
/// from negative infinity so ties resolve to the earliest-indexed record and
/// an empty catalog terminates with the sentinel.
pub fn best_match(intent: &str, query: &[f32], catalog: &Catalog) -> MatchResult {
    let mut best: Option<&crate::catalog::IntentRecord> = None;
    let mut highest = f32::NEG_INFINITY;

    for record in catalog.iter() {
        let similarity = cosine_similarity(query, &record.vector);
        if similarity > highest {
            highest = similarity;
            best = Some(record);
        }
    }

    match best {
        Some(record) => MatchResult {
            intent: intent.to_string(),
            matched_project: Some(record.project.clone()),
            params: Some(record.params.clone()),
            similarity: highest,
        },
        None => MatchResult::no_match(intent),
    }
}

/// Facade tying vectorizer, catalog, and ranker into one operation
///
/// Built once from immutable parts and shared by reference across requests;
/// nothing mutates after construction, so concurrent matching needs no locks.
pub struct IntentMatcher {
    vectorizer: Vectorizer,
    catalog: Catalog,
    config: MatcherConfig,
}

impl IntentMatcher {
    /// Create a matcher from loaded resources
    pub fn new(table: Arc<WordTable>, catalog: Catalog) -> Self {
        Self::with_config(table, catalog, MatcherConfig::default())
    }

    /// Create a matcher with explicit tuning
    pub fn with_config(table: Arc<WordTable>, catalog: Catalog, config: MatcherConfig) -> Self {
        Self {
            vectorizer: Vectorizer::new(table),
            catalog,
            config,
        }
    }

    /// Match free-text intent against the catalog. Never fails.
    pub fn match_intent(&self, text: &str) -> MatchResult {
        let query = self.vectorizer.vectorize(text);
        let result = best_match(text, &query, &self.catalog);

        match self.config.min_similarity {
            Some(threshold) if result.is_match() && result.similarity < threshold => {
                log::debug!(
                    "Best match for '{}' scored {:.4}, below threshold {:.4}",
                    text,
                    result.similarity,
                    threshold
                );
                // The sentinel still reports the computed score
                MatchResult {
                    matched_project: None,
                    params: None,
                    ..result
                }
            }
            _ => result,
        }
    }

    /// The catalog being matched against
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The vectorizer in use
    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IntentRecord;

    fn record(intent: &str, project: &str, vector: Vec<f32>) -> IntentRecord {
        IntentRecord {
            intent: intent.to_string(),
            project: project.to_string(),
            params: format!("{project}.json"),
            vector,
        }
    }

    #[test]
    fn test_cosine_similarity_self_is_one() {
        let a = vec![0.3, -1.2, 4.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![-2.0, 0.5, 1.0];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_similarity_zero_operand() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_opposite_is_minus_one() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_best_match_empty_catalog_is_sentinel() {
        let catalog = Catalog::empty(2);
        let result = best_match("anything", &[1.0, 0.0], &catalog);
        assert!(!result.is_match());
        assert_eq!(result.params, None);
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_best_match_tie_breaks_to_earliest_record() {
        let catalog = Catalog::from_records(
            vec![
                record("first", "first_project", vec![1.0, 0.0]),
                record("second", "second_project", vec![2.0, 0.0]),
            ],
            2,
        );
        // Both records point the same direction, so similarities tie at 1.0
        let result = best_match("query", &[3.0, 0.0], &catalog);
        assert_eq!(result.matched_project.as_deref(), Some("first_project"));
    }

    #[test]
    fn test_best_match_prefers_higher_similarity() {
        let catalog = Catalog::from_records(
            vec![
                record("off axis", "p1", vec![0.0, 1.0]),
                record("on axis", "p2", vec![1.0, 0.0]),
            ],
            2,
        );
        let result = best_match("query", &[1.0, 0.1], &catalog);
        assert_eq!(result.matched_project.as_deref(), Some("p2"));
    }

    #[test]
    fn test_match_intent_end_to_end() {
        let table = WordTable::from_entries(
            [
                ("scrape".to_string(), vec![1.0, 0.0, 0.0, 0.0]),
                ("news".to_string(), vec![0.0, 1.0, 0.0, 0.0]),
            ],
            4,
        );
        let catalog = Catalog::from_records(
            vec![record(
                "scrape news",
                "news_scraper",
                vec![0.5, 0.5, 0.0, 0.0],
            )],
            4,
        );
        let matcher = IntentMatcher::new(Arc::new(table), catalog);

        let result = matcher.match_intent("Scrape the news!");
        assert_eq!(result.matched_project.as_deref(), Some("news_scraper"));
        assert_eq!(result.params.as_deref(), Some("news_scraper.json"));
        // Mean of [1,0,0,0], [0,0,0,0], [0,1,0,0] is parallel to [0.5,0.5,0,0]
        assert!((result.similarity - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_match_intent_unknown_tokens_degrade() {
        let table = WordTable::from_entries([("scrape".to_string(), vec![1.0, 0.0])], 2);
        let catalog = Catalog::from_records(vec![record("scrape", "p1", vec![1.0, 0.0])], 2);
        let matcher = IntentMatcher::new(Arc::new(table), catalog);

        // All tokens unknown: query is the zero vector, every similarity 0.0,
        // the scan still selects the first record
        let result = matcher.match_intent("completely unrelated words");
        assert_eq!(result.matched_project.as_deref(), Some("p1"));
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_match_intent_threshold_gates_weak_matches() {
        let table = WordTable::from_entries([("scrape".to_string(), vec![1.0, 0.0])], 2);
        let catalog = Catalog::from_records(vec![record("scrape", "p1", vec![1.0, 0.0])], 2);
        let matcher = IntentMatcher::with_config(
            Arc::new(table),
            catalog,
            MatcherConfig {
                min_similarity: Some(0.5),
            },
        );

        assert!(matcher.match_intent("scrape").is_match());
        assert!(!matcher.match_intent("nothing known here").is_match());
    }

    #[test]
    fn test_gated_sentinel_reports_computed_similarity() {
        let table = WordTable::from_entries([("scrape".to_string(), vec![1.0, 0.0])], 2);
        // 45 degrees off the query axis: similarity is ~0.707, below the gate
        let catalog = Catalog::from_records(vec![record("diag", "p1", vec![1.0, 1.0])], 2);
        let matcher = IntentMatcher::with_config(
            Arc::new(table),
            catalog,
            MatcherConfig {
                min_similarity: Some(0.9),
            },
        );

        let result = matcher.match_intent("scrape");
        assert!(!result.is_match());
        assert!((result.similarity - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn test_match_result_wire_shape() {
        let result = MatchResult {
            intent: "scrape news".to_string(),
            matched_project: Some("news_scraper".to_string()),
            params: Some("news_params.json".to_string()),
            similarity: 0.97,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["intent"], "scrape news");
        assert_eq!(json["matchedProject"], "news_scraper");
        assert_eq!(json["params"], "news_params.json");

        let sentinel = serde_json::to_value(MatchResult::no_match("x")).unwrap();
        assert!(sentinel["matchedProject"].is_null());
    }
}
