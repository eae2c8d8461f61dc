//! Static word embedding table
//!
//! Loads a token -> vector lookup table from a JSON document once at startup.
//! The table is immutable afterwards and shared by reference.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{MatchError, Result};

/// Immutable word embedding table with a fixed dimension D
///
/// Unknown tokens resolve to the zero vector of dimension D, so a lookup is
/// always defined.
#[derive(Debug)]
pub struct WordTable {
    vectors: HashMap<String, Vec<f32>>,
    zero: Vec<f32>,
    dimension: usize,
}

impl WordTable {
    /// Load a table from a JSON object of `token -> [f32; D]`
    ///
    /// The dimension is derived from the entries and every entry must agree;
    /// a disagreement fails the whole load rather than silently picking
    /// whichever entry a map happens to enumerate first. An empty table is
    /// rejected because no dimension can be derived from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = Self::read_entries(path.as_ref())?;

        let mut dimension = None;
        for (token, vector) in &raw {
            match dimension {
                None => dimension = Some(vector.len()),
                Some(d) if d != vector.len() => {
                    return Err(MatchError::schema(format!(
                        "embedding dimension disagreement: '{}' has {} components, expected {}",
                        token,
                        vector.len(),
                        d
                    )));
                }
                Some(_) => {}
            }
        }

        let dimension = dimension.ok_or_else(|| {
            MatchError::schema("word embedding table is empty, cannot derive a dimension")
        })?;

        log::info!("Loaded {} word embeddings ({}d)", raw.len(), dimension);

        Ok(Self {
            vectors: raw,
            zero: vec![0.0; dimension],
            dimension,
        })
    }

    /// Load a table with an explicitly configured dimension
    ///
    /// Entries of any other length are skipped with a warning instead of
    /// failing the load. The table may end up empty; lookups then resolve to
    /// the zero vector for every token.
    pub fn load_with_dimension(path: impl AsRef<Path>, dimension: usize) -> Result<Self> {
        let raw = Self::read_entries(path.as_ref())?;

        let mut vectors = HashMap::with_capacity(raw.len());
        let mut skipped = 0;
        for (token, vector) in raw {
            if vector.len() == dimension {
                vectors.insert(token, vector);
            } else {
                log::warn!(
                    "Skipping embedding '{}': {} components, expected {}",
                    token,
                    vector.len(),
                    dimension
                );
                skipped += 1;
            }
        }

        log::info!("Loaded {} word embeddings ({}d)", vectors.len(), dimension);
        if skipped > 0 {
            log::warn!("Skipped {} embeddings with mismatched dimension", skipped);
        }

        Ok(Self {
            vectors,
            zero: vec![0.0; dimension],
            dimension,
        })
    }

    fn read_entries(path: &Path) -> Result<HashMap<String, Vec<f32>>> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Build a table directly from entries, for fixtures and tests
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, Vec<f32>)>,
        dimension: usize,
    ) -> Self {
        let vectors: HashMap<String, Vec<f32>> = entries
            .into_iter()
            .filter(|(_, v)| v.len() == dimension)
            .collect();

        Self {
            vectors,
            zero: vec![0.0; dimension],
            dimension,
        }
    }

    /// Look up a token, falling back to the zero vector when absent
    pub fn lookup(&self, token: &str) -> &[f32] {
        self.vectors
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or(&self.zero)
    }

    /// Number of tokens in the table
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the table holds no tokens
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Embedding dimension D
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}
