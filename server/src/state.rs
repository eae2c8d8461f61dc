//! Shared server state.
//!
//! Everything here is loaded once before serving and read-only afterwards;
//! handlers share it through an `Arc` without locking.

use std::path::PathBuf;

use intentdash_match::IntentMatcher;

use crate::ollama::OllamaClient;

/// Immutable state shared by all request handlers.
pub struct AppState {
    /// Word table + catalog + ranker, loaded at startup
    pub matcher: IntentMatcher,
    /// Base paths scanned for recently touched projects
    pub project_paths: Vec<PathBuf>,
    /// Relay client for LLM analysis
    pub ollama: OllamaClient,
}

impl AppState {
    pub fn new(matcher: IntentMatcher, project_paths: Vec<PathBuf>, ollama: OllamaClient) -> Self {
        Self {
            matcher,
            project_paths,
            ollama,
        }
    }
}
