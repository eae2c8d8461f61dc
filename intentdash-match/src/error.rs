//! Error types for intentdash-match

use thiserror::Error;

/// Errors that can occur while loading matching resources
///
/// Matching itself is total and never returns an error; everything here is a
/// load-time failure. Per-record problems (wrong vector length, missing
/// fields) are recovered locally by the loaders and only surface as an error
/// when an entire resource is unusable.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Resource file missing or unreadable
    #[error("Resource unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// Resource is not valid JSON
    #[error("Malformed resource: {0}")]
    Json(#[from] serde_json::Error),

    /// Resource parsed but violates the expected schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// A vector's length disagrees with the table dimension
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

impl MatchError {
    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a dimension mismatch error
    pub fn dimension(expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { expected, found }
    }
}

/// Result type for matching resource operations
pub type Result<T> = std::result::Result<T, MatchError>;
