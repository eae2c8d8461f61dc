//! Project catalog
//!
//! An ordered, read-only set of intent records loaded once at startup.
//! Reloading requires a process restart.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::embedding::Vectorizer;
use crate::error::{MatchError, Result};

/// One known intent and the project that fulfills it
///
/// Immutable after load. The vector has the table dimension D.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRecord {
    /// Canonical intent text, e.g. "Scrape financial news"
    pub intent: String,
    /// Project identifier the intent maps to
    pub project: String,
    /// Reference to the parameter document for the project
    #[serde(default)]
    pub params: String,
    /// Sentence vector for the intent text
    #[serde(default)]
    pub vector: Vec<f32>,
}

/// Raw record shape as found in the catalog document
///
/// Fields are optional here so one malformed record can be rejected on its
/// own instead of failing the whole array deserialization.
#[derive(Debug, Deserialize)]
struct RawRecord {
    intent: Option<String>,
    project: Option<String>,
    #[serde(default)]
    params: String,
    #[serde(default)]
    vector: Vec<f32>,
}

/// Ordered catalog of intent records
#[derive(Debug)]
pub struct Catalog {
    records: Vec<IntentRecord>,
    dimension: usize,
}

impl Catalog {
    /// Load a catalog from a JSON array, validating vectors against `dimension`
    ///
    /// A record with missing fields or a mismatched vector length is skipped
    /// with a warning; the load only fails when the document itself is
    /// unreadable or every record it contains is rejected.
    pub fn load(path: impl AsRef<Path>, dimension: usize) -> Result<Self> {
        Self::load_inner(path.as_ref(), dimension, None)
    }

    /// Load a catalog, vectorizing records that omit a precomputed vector
    ///
    /// Keeps catalog vectors consistent with the runtime word table instead
    /// of trusting a stale precomputation.
    pub fn load_with_vectorizer(path: impl AsRef<Path>, vectorizer: &Vectorizer) -> Result<Self> {
        Self::load_inner(path.as_ref(), vectorizer.dimension(), Some(vectorizer))
    }

    fn load_inner(path: &Path, dimension: usize, vectorizer: Option<&Vectorizer>) -> Result<Self> {
        let data = std::fs::read(path)?;
        let raw: Vec<RawRecord> = serde_json::from_slice(&data)?;
        let total = raw.len();

        let mut records = Vec::with_capacity(total);
        let mut skipped = 0;

        for (index, record) in raw.into_iter().enumerate() {
            match Self::validate(record, index, dimension, vectorizer) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Skipping catalog record {}: {}", index, e);
                    skipped += 1;
                }
            }
        }

        if records.is_empty() && total > 0 {
            return Err(MatchError::schema(format!(
                "all {} catalog records were rejected",
                total
            )));
        }

        log::info!("Loaded {} catalog records ({}d)", records.len(), dimension);
        if skipped > 0 {
            log::warn!("Skipped {} malformed catalog records", skipped);
        }

        Ok(Self { records, dimension })
    }

    fn validate(
        raw: RawRecord,
        index: usize,
        dimension: usize,
        vectorizer: Option<&Vectorizer>,
    ) -> Result<IntentRecord> {
        let intent = raw
            .intent
            .filter(|s| !s.is_empty())
            .ok_or_else(|| MatchError::schema(format!("record {} has no intent text", index)))?;
        let project = raw
            .project
            .filter(|s| !s.is_empty())
            .ok_or_else(|| MatchError::schema(format!("record {} has no project id", index)))?;

        let vector = if raw.vector.is_empty() {
            match vectorizer {
                Some(v) => v.vectorize(&intent),
                None => return Err(MatchError::schema(format!("record {} has no vector", index))),
            }
        } else if raw.vector.len() == dimension {
            raw.vector
        } else {
            return Err(MatchError::dimension(dimension, raw.vector.len()));
        };

        Ok(IntentRecord {
            intent,
            project,
            params: raw.params,
            vector,
        })
    }

    /// Build a catalog from already-validated records, for fixtures and tests
    pub fn from_records(records: Vec<IntentRecord>, dimension: usize) -> Self {
        Self { records, dimension }
    }

    /// An empty catalog of the given dimension
    pub fn empty(dimension: usize) -> Self {
        Self {
            records: Vec::new(),
            dimension,
        }
    }

    /// Records in load order
    pub fn records(&self) -> &[IntentRecord] {
        &self.records
    }

    /// Iterate records in load order
    pub fn iter(&self) -> std::slice::Iter<'_, IntentRecord> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Vector dimension shared by all records
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::WordTable;
    use std::io::Write;
    use std::sync::Arc;

    fn write_fixture(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_well_formed_catalog() {
        let file = write_fixture(
            r#"[
                {"intent": "scrape news", "project": "news_scraper",
                 "params": "news_params.json", "vector": [0.5, 0.5, 0.0, 0.0]},
                {"intent": "analyze sentiment", "project": "sentiment_analyzer",
                 "params": "sentiment_params.json", "vector": [0.0, 0.0, 1.0, 0.0]}
            ]"#,
        );
        let catalog = Catalog::load(file.path(), 4).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].project, "news_scraper");
        assert_eq!(catalog.dimension(), 4);
    }

    #[test]
    fn test_load_skips_mismatched_record_keeps_rest() {
        let file = write_fixture(
            r#"[
                {"intent": "bad", "project": "p1", "vector": [1.0]},
                {"intent": "good", "project": "p2", "vector": [1.0, 0.0]}
            ]"#,
        );
        let catalog = Catalog::load(file.path(), 2).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].project, "p2");
    }

    #[test]
    fn test_load_fails_when_every_record_rejected() {
        let file = write_fixture(r#"[{"intent": "bad", "project": "p1", "vector": [1.0]}]"#);
        let err = Catalog::load(file.path(), 2).unwrap_err();
        assert!(matches!(err, MatchError::Schema(_)));
    }

    #[test]
    fn test_load_empty_array_is_empty_catalog() {
        let file = write_fixture("[]");
        let catalog = Catalog::load(file.path(), 2).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_rejects_records_without_identity() {
        let file = write_fixture(
            r#"[
                {"project": "p1", "vector": [1.0, 0.0]},
                {"intent": "ok", "project": "p2", "vector": [0.0, 1.0]}
            ]"#,
        );
        let catalog = Catalog::load(file.path(), 2).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].intent, "ok");
    }

    #[test]
    fn test_load_malformed_json_is_fatal() {
        let file = write_fixture("not json");
        assert!(matches!(
            Catalog::load(file.path(), 2).unwrap_err(),
            MatchError::Json(_)
        ));
    }

    #[test]
    fn test_load_with_vectorizer_fills_missing_vectors() {
        let table = WordTable::from_entries(
            [
                ("scrape".to_string(), vec![1.0, 0.0]),
                ("news".to_string(), vec![0.0, 1.0]),
            ],
            2,
        );
        let vectorizer = Vectorizer::new(Arc::new(table));

        let file = write_fixture(r#"[{"intent": "scrape news", "project": "news_scraper"}]"#);
        let catalog = Catalog::load_with_vectorizer(file.path(), &vectorizer).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].vector, vec![0.5, 0.5]);
    }
}
