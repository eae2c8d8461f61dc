//! Intentdash matching layer
//!
//! Maps free-text intents to the most relevant known project by comparing
//! mean-pooled word-embedding vectors with cosine similarity.
//!
//! ## Design
//!
//! - **Static resources** - a word table (token -> vector) and a project
//!   catalog (intent records), both loaded once before serving and immutable
//!   afterwards. Concurrent matching reads them without locking.
//! - **Total matching** - `IntentMatcher::match_intent` never fails: unknown
//!   tokens pool as zero vectors, an empty catalog yields the no-match
//!   sentinel, degenerate cosine operands score 0.0.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use intentdash_match::{Catalog, IntentMatcher, WordTable};
//!
//! # fn main() -> intentdash_match::Result<()> {
//! let table = Arc::new(WordTable::load("data/word_embeddings.json")?);
//! let catalog = Catalog::load("data/embeddings.json", table.dimension())?;
//!
//! let matcher = IntentMatcher::new(table, catalog);
//! let result = matcher.match_intent("Scrape the news!");
//! println!("{:?} ({:.2})", result.matched_project, result.similarity);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod embedding;
pub mod error;
pub mod matcher;

// Re-exports for convenience
pub use catalog::{Catalog, IntentRecord};
pub use embedding::{find_data_file, tokenize, Vectorizer, WordTable};
pub use error::{MatchError, Result};
pub use matcher::{best_match, cosine_similarity, IntentMatcher, MatchResult, MatcherConfig};
