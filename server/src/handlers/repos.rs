//! Repository listing and detail handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ServerError, ServerResult};
use crate::repo_scan::{self, Repo, RepoDetails};
use crate::state::AppState;

/// `GET /list-repos`
///
/// Recently modified project directories, newest first. The filesystem walk
/// runs on the blocking pool so a slow mount cannot stall the runtime.
pub async fn list_repos(State(state): State<Arc<AppState>>) -> Json<Vec<Repo>> {
    tracing::info!("Listing recent repositories");
    Json(scan_projects(&state).await)
}

/// Run the directory scan off the async worker threads.
pub(crate) async fn scan_projects(state: &AppState) -> Vec<Repo> {
    let paths = state.project_paths.clone();
    tokio::task::spawn_blocking(move || repo_scan::recently_modified(&paths))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Project scan task failed: {}", e);
            Vec::new()
        })
}

/// Query parameters for `/repo-details`.
#[derive(Debug, Deserialize)]
pub struct RepoDetailsQuery {
    pub project: Option<String>,
}

/// `GET /repo-details?project=...`
pub async fn repo_details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RepoDetailsQuery>,
) -> ServerResult<Json<RepoDetails>> {
    let project = query
        .project
        .filter(|s| !s.is_empty())
        .ok_or(ServerError::MissingParameter("project"))?;

    tracing::info!("Fetching details for repo: {}", project);
    repo_scan::repo_details(&state.project_paths, &project)
        .await
        .map(Json)
        .ok_or(ServerError::ProjectNotFound(project))
}
