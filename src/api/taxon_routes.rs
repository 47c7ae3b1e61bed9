//! Taxon endpoints — search, fetch, navigation and the current pointer.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::taxon::Taxon;

use super::{reject, AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Substring to match against taxon names, case-insensitively.
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<Taxon>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChildrenQuery {
    #[serde(default)]
    pub current_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct MakeCurrentRequest {
    pub current: i64,
}

#[derive(Debug, Deserialize)]
pub struct AssignTypeRequest {
    pub specimen_id: i64,
}

#[derive(Debug, Serialize)]
pub struct TypeIdsResponse {
    pub taxon_id: i64,
    pub specimen_ids: Vec<i64>,
    /// More than one linked specimen makes the taxon an aggregate.
    pub aggregate: bool,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/taxa/:rank_id/search?q=<substring>
async fn search_taxa(
    State(state): State<AppState>,
    Path(rank_id): Path<i32>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    if query.q.len() < 2 {
        return Err((
            StatusCode::BAD_REQUEST,
            "search query must be at least 2 characters".to_string(),
        ));
    }
    let matches = state
        .service
        .search_taxa(rank_id, &query.q)
        .await
        .map_err(reject)?;
    let total = matches.len();
    Ok(Json(SearchResponse { matches, total }))
}

/// GET /api/taxa/:rank_id/:id
async fn get_taxon(
    State(state): State<AppState>,
    Path((rank_id, id)): Path<(i32, i64)>,
) -> Result<Json<Taxon>, (StatusCode, String)> {
    let taxon = state.service.taxon(rank_id, id).await.map_err(reject)?;
    Ok(Json(taxon))
}

/// GET /api/taxa/:rank_id/:id/children?current_only=<bool>
///
/// Children live one rank finer; 422 when `:rank_id` is the foundation.
async fn get_children(
    State(state): State<AppState>,
    Path((rank_id, id)): Path<(i32, i64)>,
    Query(query): Query<ChildrenQuery>,
) -> Result<Json<Vec<Taxon>>, (StatusCode, String)> {
    let children = state
        .service
        .direct_children(rank_id, id, query.current_only)
        .await
        .map_err(reject)?;
    Ok(Json(children))
}

/// PUT /api/taxa/:rank_id/:id/current
async fn make_current(
    State(state): State<AppState>,
    Path((rank_id, id)): Path<(i32, i64)>,
    Json(req): Json<MakeCurrentRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .service
        .make_current(rank_id, id, req.current)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/taxa/:rank_id/:id/types
async fn get_type_ids(
    State(state): State<AppState>,
    Path((rank_id, id)): Path<(i32, i64)>,
) -> Result<Json<TypeIdsResponse>, (StatusCode, String)> {
    let specimen_ids = state.service.type_ids(rank_id, id).await.map_err(reject)?;
    let aggregate = specimen_ids.len() > 1;
    Ok(Json(TypeIdsResponse {
        taxon_id: id,
        specimen_ids,
        aggregate,
    }))
}

/// POST /api/taxa/:rank_id/:id/types
async fn assign_type(
    State(state): State<AppState>,
    Path((rank_id, id)): Path<(i32, i64)>,
    Json(req): Json<AssignTypeRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .service
        .assign_specimen(rank_id, id, req.specimen_id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::CREATED)
}

pub fn create_taxon_router(state: AppState) -> Router {
    Router::new()
        .route("/api/taxa/:rank_id/search", get(search_taxa))
        .route("/api/taxa/:rank_id/:id", get(get_taxon))
        .route("/api/taxa/:rank_id/:id/children", get(get_children))
        .route("/api/taxa/:rank_id/:id/current", put(make_current))
        .route(
            "/api/taxa/:rank_id/:id/types",
            get(get_type_ids).post(assign_type),
        )
        .with_state(state)
}
