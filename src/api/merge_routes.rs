//! Merge validation endpoint.
//!
//! Accepts keys, returns the fully resolved proposal or the first
//! validation failure. Nothing is mutated.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use crate::merge::{MergeProposal, MergeRequest};

use super::{reject, AppState};

/// POST /api/merge/validate
async fn validate_merge(
    State(state): State<AppState>,
    Json(req): Json<MergeRequest>,
) -> Result<Json<MergeProposal>, (StatusCode, String)> {
    let proposal = state.service.validate_merge(req).await.map_err(reject)?;
    Ok(Json(proposal))
}

pub fn create_merge_router(state: AppState) -> Router {
    Router::new()
        .route("/api/merge/validate", post(validate_merge))
        .with_state(state)
}
