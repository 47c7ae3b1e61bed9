//! REST API for the taxonomy backend.
//!
//! ## Endpoints
//!
//! - `GET  /api/health`
//! - `GET  /api/ranks` — ordered ladder, finest-first (`?major=true` for the major ladder)
//! - `GET  /api/rank/:id` / `:id/place` / `:id/finer`
//! - `GET  /api/taxa/:rank_id/search?q=...`
//! - `GET  /api/taxa/:rank_id/:id` and `/children`
//! - `PUT  /api/taxa/:rank_id/:id/current`
//! - `GET|POST /api/taxa/:rank_id/:id/types`
//! - `GET  /api/types/:id`, `POST /api/types`
//! - `POST /api/merge/validate`

pub mod merge_routes;
pub mod rank_routes;
pub mod taxon_routes;
pub mod type_routes;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::error::TaxonomyError;
use crate::service::TaxonomyService;

/// Shared handler state. Clone-cheap: one `Arc` hop.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TaxonomyService>,
}

/// Assemble the full API router.
pub fn create_api_router(service: Arc<TaxonomyService>) -> Router {
    let state = AppState { service };
    Router::new()
        .route("/api/health", get(health))
        .merge(rank_routes::create_rank_router(state.clone()))
        .merge(taxon_routes::create_taxon_router(state.clone()))
        .merge(type_routes::create_type_router(state.clone()))
        .merge(merge_routes::create_merge_router(state))
}

async fn health() -> &'static str {
    "ok"
}

/// Map a domain error onto the wire. Server-side faults get logged here;
/// client-side outcomes are the caller's messaging problem.
pub(crate) fn reject(err: TaxonomyError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(%err, "request failed");
    }
    (status, err.to_string())
}
