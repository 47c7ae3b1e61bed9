//! Taxonomy REST API server.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taxonomy cargo run --bin taxonomy_server --features server
//!
//! curl http://localhost:5000/api/health
//! curl http://localhost:5000/api/ranks
//! curl "http://localhost:5000/api/taxa/4/search?q=Bombus"
//! ```

use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use taxonomy_poc::api::create_api_router;
use taxonomy_poc::config::ServerConfig;
use taxonomy_poc::database::{connect, PgRankSource, PgSpecimenStore, PgTaxonStore};
use taxonomy_poc::{RankHierarchy, TaxonomyService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.bind_addr, "starting taxonomy server");

    let pool = connect(&config).await?;

    let hierarchy = Arc::new(RankHierarchy::new(Arc::new(PgRankSource::new(pool.clone()))));
    let service = Arc::new(TaxonomyService::new(
        hierarchy.clone(),
        Arc::new(PgTaxonStore::new(pool.clone())),
        Arc::new(PgSpecimenStore::new(pool)),
    ));

    // Warm the rank cache up front. A failure here is not fatal: the cache
    // stays uninitialized and the first request retries the load.
    match hierarchy.ensure_initialized().await {
        Ok(()) => tracing::info!("rank hierarchy warmed"),
        Err(e) => tracing::warn!(%e, "rank hierarchy warm-up failed; will retry on demand"),
    }

    let app = create_api_router(service)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
