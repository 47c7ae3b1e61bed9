//! Postgres adapters for the storage ports.
//!
//! Each adapter is a newtype wrapping `PgPool`. All SQL is runtime-checked
//! (`sqlx::query_as`, not the macros) to avoid a compile-time DB
//! requirement. Per-rank tables are addressed by interpolating the trusted
//! lowercase rank name as a quoted identifier; values always bind through
//! placeholders.

pub mod rank_source;
pub mod taxon_store;
pub mod type_store;

pub use rank_source::PgRankSource;
pub use taxon_store::PgTaxonStore;
pub use type_store::PgSpecimenStore;

use anyhow::anyhow;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::error::{Result, TaxonomyError};

/// Open the shared connection pool.
pub async fn connect(config: &ServerConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.pool_size)
        .connect(&config.database_url)
        .await
        .map_err(store_error)
}

/// Any sqlx failure surfaces as `StoreUnavailable`: transient from the
/// cache's point of view, retryable on a later call.
pub(crate) fn store_error(e: sqlx::Error) -> TaxonomyError {
    TaxonomyError::StoreUnavailable(anyhow!(e))
}
