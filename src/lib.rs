//! Taxonomy backend — rank hierarchy cache over PostgreSQL.
//!
//! The heart of the crate is the rank hierarchy: taxonomy ranks live in the
//! store as unordered parent-pointer rows, and [`hierarchy::RankHierarchy`]
//! rebuilds the two linear ladders (direct and major) once per process,
//! then answers structural questions from memory. Around it sit the thin
//! entity layers: per-rank taxon tables, type specimens, and merge request
//! validation.
//!
//! Layers are feature-gated: the core is store-agnostic (port traits only),
//! `database` adds the sqlx/Postgres adapters, `server` adds the axum REST
//! surface.

// Core error handling
pub mod error;

// Configuration
pub mod config;

// Domain records
pub mod rank;
pub mod specimen;
pub mod taxon;

// Rank hierarchy: pure chain resolution + the process-wide cache
pub mod chain;
pub mod hierarchy;

// Storage ports and the domain service over them
pub mod merge;
pub mod ports;
pub mod service;

// Database integration (when enabled)
#[cfg(feature = "database")]
pub mod database;

// REST API (when enabled)
#[cfg(feature = "server")]
pub mod api;

pub use error::{Result, TaxonomyError};
pub use hierarchy::{HierarchySnapshot, RankHierarchy};
pub use rank::{Axis, Rank};
pub use service::TaxonomyService;
