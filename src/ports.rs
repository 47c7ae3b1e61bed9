//! Storage port traits.
//! Implemented by the `database` feature's Postgres adapters — core logic
//! depends only on these traits, so tests run against in-memory doubles.

use async_trait::async_trait;

use crate::error::Result;
use crate::rank::Rank;
use crate::specimen::TypeSpecimen;
use crate::taxon::Taxon;

/// Source of rank rows for the hierarchy cache.
#[async_trait]
pub trait RankSource: Send + Sync {
    /// Load rank rows in no particular order.
    ///
    /// With `major_only`, the restriction to `is_major` rows must happen at
    /// the source, so the returned set is closed under the major-parent
    /// relation as the store sees it — not a client-side filter.
    async fn load_ranks(&self, major_only: bool) -> Result<Vec<Rank>>;
}

/// Access to the per-rank entity tables.
///
/// Every operation takes the [`Rank`] addressing the table; callers resolve
/// ranks through the hierarchy cache and never invent them.
#[async_trait]
pub trait TaxonStore: Send + Sync {
    /// Case-insensitive substring search on `name`.
    async fn search_by_name(&self, rank: &Rank, pattern: &str) -> Result<Vec<Taxon>>;

    async fn find_by_id(&self, rank: &Rank, id: i64) -> Result<Option<Taxon>>;

    /// Rows of `child_rank` whose `parent` is `parent_id`; with
    /// `current_only`, restricted to rows that are their own `current`.
    async fn direct_children(
        &self,
        child_rank: &Rank,
        parent_id: i64,
        current_only: bool,
    ) -> Result<Vec<Taxon>>;

    /// Repoint a row's `current` reference. The row must exist.
    async fn set_current(&self, rank: &Rank, id: i64, current: i64) -> Result<()>;

    /// Ids of type specimens linked to a taxon through the rank's link table.
    async fn type_ids(&self, rank: &Rank, taxon_id: i64) -> Result<Vec<i64>>;

    /// Insert a taxon-to-specimen link row.
    async fn assign_type(&self, rank: &Rank, taxon_id: i64, specimen_id: i64) -> Result<()>;
}

/// Access to the shared `taxonomy.type` table.
#[async_trait]
pub trait SpecimenStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<TypeSpecimen>>;

    async fn create(&self, name: &str, author: &str, year: i32) -> Result<TypeSpecimen>;
}
