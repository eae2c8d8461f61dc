//! Intent matching handler.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use intentdash_match::MatchResult;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Query parameters for `/map-intent`.
#[derive(Debug, Deserialize)]
pub struct MapIntentQuery {
    pub intent: Option<String>,
}

/// `GET /map-intent?intent=...`
///
/// Returns the serialized `MatchResult`. Matching itself is total; the only
/// client error is a missing or empty intent parameter.
pub async fn map_intent(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapIntentQuery>,
) -> ServerResult<Json<MatchResult>> {
    let intent = query
        .intent
        .filter(|s| !s.trim().is_empty())
        .ok_or(ServerError::MissingParameter("intent"))?;

    tracing::info!("Mapping intent: {}", intent);
    let result = state.matcher.match_intent(&intent);

    tracing::debug!(
        "Intent '{}' -> {:?} ({:.4})",
        intent,
        result.matched_project,
        result.similarity
    );
    Ok(Json(result))
}
