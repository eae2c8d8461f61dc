//! HTTP route handlers for the intentdash server.

pub mod dashboard;
pub mod intent;
pub mod repos;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Build the service router over shared immutable state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard::home))
        .route("/map-intent", get(intent::map_intent))
        .route("/list-repos", get(repos::list_repos))
        .route("/repo-details", get(repos::repo_details))
        .route("/api/dashboard", get(dashboard::api_dashboard))
        .route("/api/analysis", get(dashboard::analysis))
        .with_state(state)
}
