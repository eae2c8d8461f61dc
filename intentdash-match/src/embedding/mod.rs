//! Word embedding table and intent vectorization
//!
//! Static token lookup tables plus mean-pooled sentence vectors.

mod discovery;
mod table;
mod vectorizer;

pub use discovery::{find_data_file, CATALOG_FILE, WORD_TABLE_FILE};
pub use table::WordTable;
pub use vectorizer::{tokenize, Vectorizer};
