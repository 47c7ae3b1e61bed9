//! The rank hierarchy cache — a process-wide materialization of the
//! taxonomic ladder, built at most once and read many times.
//!
//! Rank structure changes so rarely that querying the store for it on every
//! request is waste; the cache loads the rank rows once, resolves both
//! ladders, and answers structural questions from memory thereafter. There
//! is no refresh path — a structural change to the real taxonomy requires a
//! process restart.
//!
//! Unlike the usual module-level singleton, the cache is an explicitly
//! constructed instance handed to consumers by `Arc`, which keeps the
//! single-flight guard testable against a counting source double.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::chain::resolve_chain;
use crate::error::{Result, TaxonomyError};
use crate::ports::RankSource;
use crate::rank::{Axis, Rank};

/// The immutable product of one successful initialization.
///
/// Both orderings run finest-first. `major_order` indexes into `ranks` too:
/// major ids are a subset of the full set.
#[derive(Debug)]
pub struct HierarchySnapshot {
    ranks: HashMap<i32, Rank>,
    direct_order: Vec<i32>,
    major_order: Vec<i32>,
}

impl HierarchySnapshot {
    /// Look up a rank record by id.
    pub fn record(&self, id: i32) -> Result<&Rank> {
        self.ranks.get(&id).ok_or_else(|| TaxonomyError::rank_not_found(id))
    }

    /// Zero-based position of a rank in the direct ladder, foundation first.
    /// Doubles as validation that the id names a known rank.
    pub fn place(&self, id: i32) -> Result<usize> {
        self.direct_order
            .iter()
            .position(|&r| r == id)
            .ok_or_else(|| TaxonomyError::rank_not_found(id))
    }

    /// The rank one step closer to the foundation than `id` on the direct
    /// ladder. The foundation itself has nothing finer.
    pub fn immediate_finer(&self, id: i32) -> Result<&Rank> {
        let place = self.place(id)?;
        if place == 0 {
            let rank = &self.ranks[&id];
            return Err(TaxonomyError::NoFinerRank(rank.name.clone()));
        }
        self.record(self.direct_order[place - 1])
    }

    pub fn direct_order(&self) -> &[i32] {
        &self.direct_order
    }

    pub fn major_order(&self) -> &[i32] {
        &self.major_order
    }

    /// Rank records along one axis, finest-first.
    pub fn ladder(&self, axis: Axis) -> Vec<&Rank> {
        let order = match axis {
            Axis::Direct => &self.direct_order,
            Axis::Major => &self.major_order,
        };
        order.iter().map(|id| &self.ranks[id]).collect()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Lazily initialized, concurrency-safe cache over a [`RankSource`].
///
/// `OnceCell::get_or_try_init` is the single-flight guard: concurrent first
/// callers queue behind one in-flight build, a success is published for the
/// process lifetime, and a failure leaves the cell empty so a later call
/// can retry once the store recovers. Partial state is never published.
pub struct RankHierarchy {
    source: Arc<dyn RankSource>,
    cell: OnceCell<Arc<HierarchySnapshot>>,
}

impl RankHierarchy {
    pub fn new(source: Arc<dyn RankSource>) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Build the snapshot if this is the first successful call, then return
    /// the shared handle.
    pub async fn snapshot(&self) -> Result<Arc<HierarchySnapshot>> {
        self.cell
            .get_or_try_init(|| self.build())
            .await
            .cloned()
    }

    /// Idempotent initialization; see [`RankHierarchy::snapshot`].
    pub async fn ensure_initialized(&self) -> Result<()> {
        self.snapshot().await.map(|_| ())
    }

    /// Whether a snapshot has been published. A failed attempt leaves this
    /// false.
    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }

    async fn build(&self) -> Result<Arc<HierarchySnapshot>> {
        let all = self.source.load_ranks(false).await?;
        let ranks: HashMap<i32, Rank> = all.into_iter().map(|r| (r.id, r)).collect();
        let direct_order = resolve_chain(&ranks, Axis::Direct)?;

        // The major ladder is resolved over a second, source-filtered fetch:
        // sub-ranks (e.g. subspecies) in the full set would otherwise leave
        // the major set not closed under its own parent relation.
        let major = self.source.load_ranks(true).await?;
        let major_set: HashMap<i32, Rank> = major.into_iter().map(|r| (r.id, r)).collect();
        let major_order = resolve_chain(&major_set, Axis::Major)?;

        // Both fetches must describe the same world: every major id has to
        // exist in the full map the queries below resolve against.
        for id in &major_order {
            if !ranks.contains_key(id) {
                return Err(TaxonomyError::StructuralInconsistency(format!(
                    "major rank {id} is absent from the full rank set"
                )));
            }
        }

        tracing::info!(
            ranks = ranks.len(),
            major = major_order.len(),
            "rank hierarchy initialized"
        );

        Ok(Arc::new(HierarchySnapshot {
            ranks,
            direct_order,
            major_order,
        }))
    }

    // ── Convenience forwards (each implies initialization) ────────

    pub async fn record(&self, id: i32) -> Result<Rank> {
        Ok(self.snapshot().await?.record(id)?.clone())
    }

    pub async fn place(&self, id: i32) -> Result<usize> {
        self.snapshot().await?.place(id)
    }

    pub async fn immediate_finer(&self, id: i32) -> Result<Rank> {
        Ok(self.snapshot().await?.immediate_finer(id)?.clone())
    }
}

impl std::fmt::Debug for RankHierarchy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankHierarchy")
            .field("ready", &self.is_ready())
            .finish()
    }
}
