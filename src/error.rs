//! Error type shared across the taxonomy backend.
//!
//! Every fallible operation surfaces one of these variants to its caller;
//! nothing is logged-and-swallowed. The HTTP layer maps variants to status
//! codes through [`TaxonomyError::http_status`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaxonomyError>;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("not found: {0}")]
    NotFound(String),

    /// Asking for the rank finer than the foundation. A domain boundary,
    /// distinct from [`TaxonomyError::NotFound`] so callers can special-case
    /// "already at the bottom" without mistaking it for bad input.
    #[error("no finer rank: {0} is the foundation rank")]
    NoFinerRank(String),

    /// The loaded rank set does not form a single chain. Requires manual
    /// correction in the store; the cache refuses to publish a guessed order.
    #[error("rank structure compromised: {0}")]
    StructuralInconsistency(String),

    /// Transient store failure — a later initialization attempt may succeed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl TaxonomyError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::NoFinerRank(_) => 422,
            Self::StructuralInconsistency(_) => 500,
            Self::StoreUnavailable(_) => 503,
            Self::InvalidInput(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    pub(crate) fn rank_not_found(id: i32) -> Self {
        Self::NotFound(format!("rank {id}"))
    }
}
