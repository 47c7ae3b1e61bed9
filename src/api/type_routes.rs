//! Type specimen endpoints.
//!
//! Creating a type specimen is deliberately narrow: a direct copy of the
//! physical label, nothing derived.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::specimen::TypeSpecimen;

use super::{reject, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateTypeRequest {
    /// Full name as per the physical label.
    pub name: String,
    pub author: String,
    pub year: i32,
}

/// GET /api/types/:id
async fn get_specimen(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TypeSpecimen>, (StatusCode, String)> {
    let specimen = state.service.specimen(id).await.map_err(reject)?;
    Ok(Json(specimen))
}

/// POST /api/types
async fn create_specimen(
    State(state): State<AppState>,
    Json(req): Json<CreateTypeRequest>,
) -> Result<(StatusCode, Json<TypeSpecimen>), (StatusCode, String)> {
    let specimen = state
        .service
        .create_specimen(&req.name, &req.author, req.year)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(specimen)))
}

pub fn create_type_router(state: AppState) -> Router {
    Router::new()
        .route("/api/types", post(create_specimen))
        .route("/api/types/:id", get(get_specimen))
        .with_state(state)
}
