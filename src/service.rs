//! TaxonomyService — the domain service the API layer talks to.
//!
//! Owns the rank hierarchy cache and the two stores. Callers address
//! everything by id; rank records are only ever minted by the loader and
//! resolved here through the cache.

use std::sync::Arc;

use crate::error::{Result, TaxonomyError};
use crate::hierarchy::RankHierarchy;
use crate::ports::{SpecimenStore, TaxonStore};
use crate::rank::Rank;
use crate::specimen::TypeSpecimen;
use crate::taxon::Taxon;

pub struct TaxonomyService {
    hierarchy: Arc<RankHierarchy>,
    taxa: Arc<dyn TaxonStore>,
    specimens: Arc<dyn SpecimenStore>,
}

impl TaxonomyService {
    pub fn new(
        hierarchy: Arc<RankHierarchy>,
        taxa: Arc<dyn TaxonStore>,
        specimens: Arc<dyn SpecimenStore>,
    ) -> Self {
        Self {
            hierarchy,
            taxa,
            specimens,
        }
    }

    pub fn hierarchy(&self) -> &Arc<RankHierarchy> {
        &self.hierarchy
    }

    pub(crate) async fn rank(&self, rank_id: i32) -> Result<Rank> {
        self.hierarchy.record(rank_id).await
    }

    // ── Taxon navigation ──────────────────────────────────────────

    /// Case-insensitive substring search within one rank's table.
    pub async fn search_taxa(&self, rank_id: i32, pattern: &str) -> Result<Vec<Taxon>> {
        let rank = self.rank(rank_id).await?;
        self.taxa.search_by_name(&rank, pattern).await
    }

    pub async fn taxon(&self, rank_id: i32, id: i64) -> Result<Taxon> {
        let rank = self.rank(rank_id).await?;
        self.taxa
            .find_by_id(&rank, id)
            .await?
            .ok_or_else(|| TaxonomyError::NotFound(format!("{} {id}", rank.name)))
    }

    /// Children of a taxon live one rank finer than it; a taxon at the
    /// foundation rank has none by construction.
    pub async fn direct_children(
        &self,
        rank_id: i32,
        taxon_id: i64,
        current_only: bool,
    ) -> Result<Vec<Taxon>> {
        let child_rank = self.hierarchy.immediate_finer(rank_id).await?;
        self.taxa
            .direct_children(&child_rank, taxon_id, current_only)
            .await
    }

    /// Repoint a taxon's accepted understanding.
    pub async fn make_current(&self, rank_id: i32, id: i64, current: i64) -> Result<()> {
        let rank = self.rank(rank_id).await?;
        self.taxa.set_current(&rank, id, current).await?;
        tracing::info!(rank = %rank.name, id, current, "current pointer updated");
        Ok(())
    }

    // ── Type specimens ────────────────────────────────────────────

    pub async fn type_ids(&self, rank_id: i32, taxon_id: i64) -> Result<Vec<i64>> {
        let rank = self.rank(rank_id).await?;
        self.taxa.type_ids(&rank, taxon_id).await
    }

    /// A taxon carrying more than one specimen link is an aggregate,
    /// regardless of what its name suggests.
    pub async fn is_aggregate(&self, rank_id: i32, taxon_id: i64) -> Result<bool> {
        Ok(self.type_ids(rank_id, taxon_id).await?.len() > 1)
    }

    pub async fn specimen(&self, id: i64) -> Result<TypeSpecimen> {
        self.specimens
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaxonomyError::NotFound(format!("type specimen {id}")))
    }

    /// Record a new type specimen, verbatim from its physical label.
    pub async fn create_specimen(
        &self,
        name: &str,
        author: &str,
        year: i32,
    ) -> Result<TypeSpecimen> {
        let specimen = self.specimens.create(name, author, year).await?;
        tracing::info!(id = specimen.id, name, "type specimen created");
        Ok(specimen)
    }

    /// Link an existing specimen to an existing taxon. Both endpoints are
    /// resolved first so a dangling link can never be written.
    pub async fn assign_specimen(
        &self,
        rank_id: i32,
        taxon_id: i64,
        specimen_id: i64,
    ) -> Result<()> {
        let taxon = self.taxon(rank_id, taxon_id).await?;
        let specimen = self.specimen(specimen_id).await?;
        let rank = self.rank(rank_id).await?;
        self.taxa.assign_type(&rank, taxon.id, specimen.id).await?;
        tracing::info!(
            rank = %rank.name,
            taxon = taxon.id,
            specimen = specimen.id,
            "type specimen assigned"
        );
        Ok(())
    }
}
