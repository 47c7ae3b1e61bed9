//! Rank structure endpoints — read-only views over the hierarchy cache.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::rank::{Axis, Rank};

use super::{reject, AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LadderQuery {
    /// Return the major ladder instead of the full direct ladder.
    #[serde(default)]
    pub major: bool,
}

#[derive(Debug, Serialize)]
pub struct LadderResponse {
    pub axis: Axis,
    /// Finest-first.
    pub ranks: Vec<Rank>,
}

#[derive(Debug, Serialize)]
pub struct PlaceResponse {
    pub rank_id: i32,
    /// Zero-based position in the direct ladder; 0 is the foundation.
    pub place: usize,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/ranks?major=<bool>
async fn list_ladder(
    State(state): State<AppState>,
    Query(query): Query<LadderQuery>,
) -> Result<Json<LadderResponse>, (StatusCode, String)> {
    let snapshot = state
        .service
        .hierarchy()
        .snapshot()
        .await
        .map_err(reject)?;
    let axis = if query.major { Axis::Major } else { Axis::Direct };
    let ranks = snapshot.ladder(axis).into_iter().cloned().collect();
    Ok(Json(LadderResponse { axis, ranks }))
}

/// GET /api/rank/:id
async fn get_rank(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Rank>, (StatusCode, String)> {
    let rank = state.service.hierarchy().record(id).await.map_err(reject)?;
    Ok(Json(rank))
}

/// GET /api/rank/:id/place
async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PlaceResponse>, (StatusCode, String)> {
    let place = state.service.hierarchy().place(id).await.map_err(reject)?;
    Ok(Json(PlaceResponse { rank_id: id, place }))
}

/// GET /api/rank/:id/finer
///
/// The rank one step finer than `:id`. 422 when `:id` is already the
/// foundation.
async fn get_finer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Rank>, (StatusCode, String)> {
    let rank = state
        .service
        .hierarchy()
        .immediate_finer(id)
        .await
        .map_err(reject)?;
    Ok(Json(rank))
}

pub fn create_rank_router(state: AppState) -> Router {
    Router::new()
        .route("/api/ranks", get(list_ladder))
        .route("/api/rank/:id", get(get_rank))
        .route("/api/rank/:id/place", get(get_place))
        .route("/api/rank/:id/finer", get(get_finer))
        .with_state(state)
}
